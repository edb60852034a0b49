//! Routes one decoded request to its handler.

use crate::config::{ConfigStore, CredentialSupplier};
use crate::editor::{self, CommandRunner, ProcessRunner};
use crate::error::CoreError;
use crate::error::editor::EditorError;
use crate::judge::{JudgeClient, JudgeJob, Sleeper, TokioSleeper};
use crate::problem_file::ProblemFileWriter;

use models::{ProblemRecord, Request, Response};

use std::sync::Arc;

use log::{error, info, warn};

/// Anything that turns a request into exactly one response.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, request: Request) -> impl Future<Output = Response> + Send;
}

/// Handles requests inside the privileged host process.
pub struct Dispatcher<R: CommandRunner = ProcessRunner, Z: Sleeper = TokioSleeper> {
    store: Arc<dyn ConfigStore>,
    judge: JudgeClient<Z>,
    runner: R,
}

impl Dispatcher<ProcessRunner, TokioSleeper> {
    /// Dispatcher wired to real processes and the public judge.
    pub fn new<S>(store: Arc<S>) -> Result<Self, CoreError>
    where
        S: ConfigStore + CredentialSupplier + 'static,
    {
        let credentials: Arc<dyn CredentialSupplier> = store.clone();
        let judge = JudgeClient::new(credentials)?;
        Ok(Self::with_parts(store, judge, ProcessRunner))
    }
}

impl<R: CommandRunner, Z: Sleeper> Dispatcher<R, Z> {
    pub fn with_parts(store: Arc<dyn ConfigStore>, judge: JudgeClient<Z>, runner: R) -> Self {
        Self {
            store,
            judge,
            runner,
        }
    }

    /// Handle a request. Errors become a structured failure response.
    pub async fn dispatch(&self, request: Request) -> Response {
        let action = request.action();
        info!("Handling {action}");

        match self.route(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("{action} failed: {e}");
                e.to_response()
            }
        }
    }

    async fn route(&self, request: Request) -> Result<Response, CoreError> {
        match request {
            Request::OpenProblem { data } => self.open_problem(data).await,

            Request::GetConfig => {
                let config = self.store.load()?;
                Ok(Response::ok().with_config(config.view()))
            }

            Request::SetConfig { key, value } => {
                let config = self.store.set(&key, &value)?;
                info!("Updated setting {key}");
                Ok(Response::ok().with_config(config.view()))
            }

            Request::TestSolution {
                slug,
                question_id,
                code,
                language,
                test_cases,
            } => {
                let job = JudgeJob::test(slug, question_id, code, language, test_cases);
                let report = self.judge.run_job(&job).await?;
                Ok(Response::ok().with_report(report))
            }

            Request::SubmitSolution {
                slug,
                question_id,
                code,
                language,
            } => {
                let job = JudgeJob::submit(slug, question_id, code, language);
                let report = self.judge.run_job(&job).await?;
                Ok(Response::ok().with_report(report))
            }
        }
    }

    /// Write the problem file, then try the editor chain. A missing editor
    /// still reports the written file.
    async fn open_problem(&self, record: ProblemRecord) -> Result<Response, CoreError> {
        record.validate()?;
        info!("Processing: {}", record.display_name());

        let config = self.store.load()?;
        let path = ProblemFileWriter::new(&config.workspace_dir).write(&record)?;
        info!("Created: {}", path.display());

        let response = Response::ok().with_file_path(path.to_string_lossy());
        let chain = editor::chain_for(&config.editor);

        match editor::open_in_editor(&self.runner, &chain, &path).await {
            Ok(launched) => Ok(response.with_editor(launched.program)),
            Err(e @ EditorError::NotFound { .. }) => {
                warn!("{e}");
                Ok(response.without_editor().with_hint(e.hint()))
            }
        }
    }
}

impl<R: CommandRunner, Z: Sleeper> RequestHandler for Dispatcher<R, Z> {
    async fn handle(&self, request: Request) -> Response {
        self.dispatch(request).await
    }
}
