//! Allows you to send submissions to a code execution service.

mod error;

use async_trait::async_trait;
use exec_apis::{ExecutionResult, Submission};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub use error::ServiceError;

/// Header carrying the client-generated run id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Something that can run a submission and report the outcome.
///
/// Implementations perform exactly one attempt per call.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, submission: &Submission) -> Result<ExecutionResult, ServiceError>;
}

/// HTTP client for the execution service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct Client {
    endpoint: Arc<Endpoint>,
    bearer_token: Option<Arc<str>>,
    transport: reqwest::Client,
}

impl Client {
    /// Creates a new builder.
    pub fn builder(endpoint: Endpoint) -> ClientBuilder {
        ClientBuilder {
            endpoint,
            bearer_token: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint.url
    }

    async fn call(&self, submission: &Submission, run_id: Uuid) -> Result<ExecutionResult, ServiceError> {
        let mut req = self
            .transport
            .post(self.endpoint.url.as_str())
            .header(REQUEST_ID_HEADER, run_id.to_string())
            .json(submission);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.map_err(|err| {
            tracing::warn!(err = %err, "failed to send submission");
            ServiceError::Transport(err)
        })?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(ServiceError::Transport)?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "execution service responded with error");
            return Err(ServiceError::from_status(status, &body));
        }
        let result = ExecutionResult::from_slice(&body).map_err(|err| {
            tracing::warn!(err = %err, "execution service response does not match schema");
            ServiceError::Malformed(err)
        })?;
        tracing::info!(
            score = result.score,
            tests = result.test_results.len(),
            passed = result.passed_count(),
            "submission judged"
        );
        Ok(result)
    }
}

#[async_trait]
impl Executor for Client {
    /// Sends a submission. Every call gets a fresh run id.
    async fn execute(&self, submission: &Submission) -> Result<ExecutionResult, ServiceError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "execute",
            run_id = %run_id,
            language_id = submission.language_id,
            test_id = submission.test_id.as_deref().unwrap_or(""),
        );
        self.call(submission, run_id).instrument(span).await
    }
}

/// The builder for `Client`.
pub struct ClientBuilder {
    endpoint: Endpoint,
    bearer_token: Option<String>,
}

impl ClientBuilder {
    /// Sends `Authorization: Bearer <token>` with every submission.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Builds a client
    pub fn build(self) -> Client {
        Client {
            endpoint: Arc::new(self.endpoint),
            bearer_token: self.bearer_token.map(Into::into),
            transport: reqwest::Client::new(),
        }
    }
}

/// Execution service endpoint, e.g. `http://localhost:5000/api/execute`.
/// Submissions are POSTed to this exact URL.
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    pub fn new_from_address(address: &str) -> Endpoint {
        Endpoint {
            url: address.to_string(),
        }
    }
}
