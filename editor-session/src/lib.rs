//! Code editor component: owns the code buffer, the selected language and
//! the outcome of the last run, and talks to an execution service.
//!
//! Each [`EditorSession`] is independent. At most one submission per session
//! is in flight; a run requested while another is outstanding is refused
//! without touching the network, so results always show up in submission
//! order.

mod props;
pub mod render;

use exec_apis::{answer::AnswerState, ExecutionResult, Submission};
use exec_client::{Executor, ServiceError};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

pub use props::{EditorProps, ExampleCase, StarterCode};
pub use render::{render, ResultView};

/// Shown while there is no output to display.
pub const NO_OUTPUT: &str = "No output yet";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Rejected before anything was sent
    #[error("Please write some code before running")]
    EmptyCode,
    #[error("a submission is already running")]
    Busy,
    #[error("this editor is read-only")]
    ReadOnly,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Nothing was run yet
    Idle,
    Running,
    Finished(ExecutionResult),
    /// The execution service could not produce a result
    Failed(String),
    /// The submission did not pass client-side validation
    Rejected(String),
}

/// Receives answer state after every edit and every successful run.
pub trait AnswerObserver: Send {
    fn answer_changed(&mut self, answer: &AnswerState);
}

impl<F> AnswerObserver for F
where
    F: FnMut(&AnswerState) + Send,
{
    fn answer_changed(&mut self, answer: &AnswerState) {
        self(answer)
    }
}

struct EditorState {
    code: String,
    language: String,
    run: RunState,
}

/// One editor instance.
pub struct EditorSession {
    props: EditorProps,
    executor: Arc<dyn Executor>,
    state: Mutex<EditorState>,
    in_flight: AtomicBool,
    observer: Mutex<Option<Box<dyn AnswerObserver>>>,
}

impl EditorSession {
    /// The buffer starts with the starter code for `props.language`.
    pub fn new(props: EditorProps, executor: Arc<dyn Executor>) -> EditorSession {
        let state = EditorState {
            code: props.initial_code.for_language(&props.language).to_string(),
            language: props.language.clone(),
            run: RunState::Idle,
        };
        EditorSession {
            props,
            executor,
            state: Mutex::new(state),
            in_flight: AtomicBool::new(false),
            observer: Mutex::new(None),
        }
    }

    pub fn with_observer(self, observer: impl AnswerObserver + 'static) -> EditorSession {
        *lock(&self.observer) = Some(Box::new(observer));
        self
    }

    pub fn code(&self) -> String {
        lock(&self.state).code.clone()
    }

    pub fn language(&self) -> String {
        lock(&self.state).language.clone()
    }

    /// Whether a submission is outstanding, i.e. the run control is disabled.
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn run_state(&self) -> RunState {
        lock(&self.state).run.clone()
    }

    pub fn test_cases(&self) -> &[ExampleCase] {
        &self.props.test_cases
    }

    /// Judge harness for the selected language, handed over untouched.
    pub fn validation_program(&self) -> Option<String> {
        let language = self.language();
        props::lookup_ignore_case(&self.props.validation_program, &language).map(str::to_string)
    }

    /// Captured stdout of the last successful run, or [`NO_OUTPUT`].
    pub fn output_text(&self) -> String {
        match &lock(&self.state).run {
            RunState::Finished(result) if !result.output.is_empty() => result.output.clone(),
            _ => NO_OUTPUT.to_string(),
        }
    }

    /// User-visible error of the last run, if it failed.
    pub fn error_text(&self) -> Option<String> {
        match &lock(&self.state).run {
            RunState::Failed(msg) | RunState::Rejected(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Rendered result of the last successful run.
    pub fn view(&self) -> Option<ResultView> {
        match &lock(&self.state).run {
            RunState::Finished(result) => Some(render(result)),
            _ => None,
        }
    }

    /// Replaces the buffer.
    pub fn edit(&self, code: &str) -> Result<(), SessionError> {
        if self.props.read_only {
            return Err(SessionError::ReadOnly);
        }
        lock(&self.state).code = code.to_string();
        self.notify(AnswerState::edited(code));
        Ok(())
    }

    /// Switches the language. The buffer is kept as is.
    pub fn set_language(&self, language: &str) {
        let mut state = lock(&self.state);
        tracing::debug!(from = %state.language, to = language, "language switched");
        state.language = language.to_string();
    }

    /// Replaces the buffer with the starter code of the selected language.
    pub fn reset_code(&self) -> Result<(), SessionError> {
        if self.props.read_only {
            return Err(SessionError::ReadOnly);
        }
        let code = {
            let mut state = lock(&self.state);
            state.code = self.props.initial_code.for_language(&state.language).to_string();
            state.code.clone()
        };
        self.notify(AnswerState::edited(&code));
        Ok(())
    }

    /// Submits the buffer once. There is no retry; call again to retry.
    ///
    /// The previous result is cleared before the request goes out.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<ExecutionResult, SessionError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("run requested while another one is in flight");
            return Err(SessionError::Busy);
        }
        let _in_flight = InFlight(&self.in_flight);

        let submission = {
            let mut state = lock(&self.state);
            if state.code.trim().is_empty() {
                tracing::info!("refusing to submit empty code");
                let err = SessionError::EmptyCode;
                state.run = RunState::Rejected(err.to_string());
                return Err(err);
            }
            state.run = RunState::Running;
            Submission::new(state.code.clone(), &state.language, &self.props.context)
        };

        match self.executor.execute(&submission).await {
            Ok(result) => {
                lock(&self.state).run = RunState::Finished(result.clone());
                self.notify(AnswerState::ran(&submission.code, &result));
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(err = %err, "run failed");
                lock(&self.state).run = RunState::Failed(err.to_string());
                Err(err.into())
            }
        }
    }

    fn notify(&self, answer: AnswerState) {
        if let Some(observer) = lock(&self.observer).as_mut() {
            observer.answer_changed(&answer);
        }
    }
}

/// Clears the in-flight flag when the run ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
