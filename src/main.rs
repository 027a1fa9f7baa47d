mod question;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use editor_session::{EditorProps, EditorSession};
use exec_apis::{answer::AnswerState, Language};
use exec_client::{Client, Endpoint};
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};
use strum::IntoEnumIterator;

/// Command-line client for the LMS code execution service
#[derive(Parser)]
#[command(name = "lms-runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit code and show the judged result
    Run(RunArgs),
    /// List supported languages and their engine ids
    Languages,
}

#[derive(Args)]
struct RunArgs {
    /// Execution endpoint, e.g. http://localhost:5000/api/execute
    #[arg(long, short = 'e', env = "LMS_EXEC_ENDPOINT")]
    endpoint: String,
    /// Bearer token sent with the submission
    #[arg(long, env = "LMS_EXEC_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Question file (YAML or JSON)
    #[arg(long, short = 'q')]
    question: Option<PathBuf>,
    /// Path to source file. Defaults to the question's starter code
    #[arg(long, short = 's')]
    source: Option<PathBuf>,
    /// Language label, overrides the question's
    #[arg(long, short = 'l')]
    language: Option<String>,
    #[arg(long)]
    test_id: Option<String>,
    #[arg(long)]
    question_id: Option<String>,
    /// Where to write the answer state as JSON after the run
    #[arg(long)]
    answer_out: Option<PathBuf>,
}

async fn load_props(args: &RunArgs) -> anyhow::Result<EditorProps> {
    let mut props = match &args.question {
        Some(path) => question::load(path).await?,
        None => EditorProps::default(),
    };
    if let Some(lang) = &args.language {
        props.language = lang.clone();
    }
    if args.test_id.is_some() {
        props.context.test_id = args.test_id.clone();
    }
    if args.question_id.is_some() {
        props.context.question_id = args.question_id.clone();
    }
    Ok(props)
}

fn create_client(args: &RunArgs) -> Client {
    let mut builder = Client::builder(Endpoint::new_from_address(&args.endpoint));
    if let Some(token) = &args.token {
        builder = builder.bearer_token(token.clone());
    }
    builder.build()
}

/// Runs one submission and returns the text to print.
async fn run(args: RunArgs) -> anyhow::Result<String> {
    let props = load_props(&args).await?;
    let latest_answer = Arc::new(Mutex::new(None::<AnswerState>));
    let client = create_client(&args);
    tracing::debug!(endpoint = client.endpoint(), "execution service configured");
    let session = {
        let sink = latest_answer.clone();
        EditorSession::new(props, Arc::new(client)).with_observer(
            move |answer: &AnswerState| {
                if let Ok(mut slot) = sink.lock() {
                    *slot = Some(answer.clone());
                }
            },
        )
    };
    if let Some(path) = &args.source {
        let source = tokio::fs::read_to_string(path)
            .await
            .context("failed to read run source")?;
        session.edit(&source).context("failed to load run source")?;
    }
    tracing::info!(language = %session.language(), "submitting");

    let outcome = session.run().await;

    if let Some(path) = &args.answer_out {
        let answer = latest_answer.lock().ok().and_then(|slot| slot.as_ref().cloned());
        if let Some(answer) = answer {
            let data = serde_json::to_vec_pretty(&answer).context("failed to serialize answer")?;
            tokio::fs::write(path, data)
                .await
                .with_context(|| format!("failed to write answer to {}", path.display()))?;
        }
    }
    outcome.context("run was not successful")?;

    let mut out = String::new();
    if let Some(view) = session.view() {
        out.push_str(&view.to_string());
        out.push('\n');
    }
    out.push_str("Output:\n");
    out.push_str(&session.output_text());
    out.push('\n');
    Ok(out)
}

fn languages() -> String {
    Language::iter()
        .map(|lang| format!("{:<12}{}\n", lang.as_str(), lang.engine_id()))
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let out = match cli.command {
        Commands::Run(args) => run(args).await?,
        Commands::Languages => languages(),
    };
    print!("{}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::io::Write;

    fn run_args(endpoint: String) -> RunArgs {
        RunArgs {
            endpoint,
            token: None,
            question: None,
            source: None,
            language: None,
            test_id: None,
            question_id: None,
            answer_out: None,
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn lists_languages() {
        let text = languages();
        assert!(text.contains("python      71\n"));
        assert!(text.contains("java        62\n"));
        assert!(text.contains("cpp         54\n"));
        assert!(text.contains("javascript  63\n"));
    }

    #[tokio::test]
    async fn runs_source_file_and_writes_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/execute")
            .match_header("authorization", "Bearer tok")
            .match_body(Matcher::PartialJson(json!({
                "code": "print(input())\n",
                "languageId": 71,
                "testId": "t-5"
            })))
            .with_status(200)
            .with_body(
                json!({
                    "output": "hi\n",
                    "score": 50,
                    "testResults": [
                        {"input": "hi", "expectedOutput": "hi", "actualOutput": "hi", "passed": true},
                        {"input": "yo", "expectedOutput": "yo", "actualOutput": "", "passed": false,
                         "error": "EOFError"}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut source = tempfile::NamedTempFile::new().unwrap();
        source.write_all(b"print(input())\n").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let answer_path = dir.path().join("answer.json");

        let args = RunArgs {
            token: Some("tok".to_string()),
            source: Some(source.path().to_path_buf()),
            test_id: Some("t-5".to_string()),
            answer_out: Some(answer_path.clone()),
            ..run_args(format!("{}/execute", server.url()))
        };
        let out = run(args).await.unwrap();
        mock.assert_async().await;

        assert!(out.contains("Passed 1 of 2 test cases"));
        assert!(out.contains("!! Error: EOFError"));
        assert!(out.ends_with("Output:\nhi\n\n"));

        let answer: AnswerState =
            serde_json::from_slice(&std::fs::read(&answer_path).unwrap()).unwrap();
        assert_eq!(answer.code, "print(input())\n");
        assert_eq!(answer.score, Some(50));
    }

    #[tokio::test]
    async fn empty_starter_is_rejected_without_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/execute")
            .expect(0)
            .create_async()
            .await;
        let err = run(run_args(format!("{}/execute", server.url())))
            .await
            .unwrap_err();
        mock.assert_async().await;
        assert_eq!(format!("{:#}", err), "run was not successful: Please write some code before running");
    }
}
