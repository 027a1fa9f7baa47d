//! Question files describe how the editor is set up, the way a host page
//! would: starter code, language, example cases, judge harness and ids.
use anyhow::Context as _;
use editor_session::EditorProps;
use std::path::Path;

/// Reads a question file (YAML; plain JSON works too).
#[tracing::instrument]
pub async fn load(path: &Path) -> anyhow::Result<EditorProps> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read question file {}", path.display()))?;
    let props: EditorProps = serde_yaml::from_slice(&data).context("invalid question file")?;
    tracing::debug!(
        language = %props.language,
        examples = props.test_cases.len(),
        "question loaded"
    );
    Ok(props)
}
