use reqwest::StatusCode;

/// Failure to get a usable result out of the execution service.
///
/// `Display` gives a message suitable for showing to the user.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("could not reach the execution service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("execution service responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("execution service returned an unexpected response: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl ServiceError {
    /// Prefers the server-provided `error` or `message` field of a JSON body
    /// over the generic reason phrase.
    pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> ServiceError {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error", "message"]
                    .iter()
                    .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        ServiceError::Status {
            status: status.as_u16(),
            message,
        }
    }
}
