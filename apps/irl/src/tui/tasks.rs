//! Background jobs for the TUI.
//!
//! Network and filesystem work runs on a separate thread with its own tokio
//! runtime so the event loop never blocks. Every job reports exactly one
//! [`TaskMessage`] over an mpsc channel, stamped with the generation that
//! was current when it was issued. Receivers compare that stamp with their
//! own generation and drop stale results.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use anyhow::Result;

use crate::project::{AdoptRequest, CreateRequest, ProjectOutcome, adopt_folder, create_project};
use crate::settings::Profile;
use crate::templates::embedded::{DEFAULT_TEMPLATE, embedded_templates};
use crate::templates::{Template, TemplateResolver};

/// The side-effecting action a wizard ends with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    /// Create a new project folder.
    Create {
        base_dir: PathBuf,
        name: String,
        template: Option<String>,
        profile: Profile,
    },
    /// Copy an existing folder into the workspace.
    Adopt {
        source: PathBuf,
        base_dir: PathBuf,
        template: Option<String>,
        profile: Profile,
    },
}

impl ActionRequest {
    /// Template to resolve, `None` meaning the default.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        match self {
            Self::Create { template, .. } | Self::Adopt { template, .. } => template.as_deref(),
        }
    }
}

/// Work to run in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// List templates through the cache and fallback chain.
    LoadTemplates,
    /// Force a remote refresh.
    RefreshTemplates,
    /// Count remote templates missing from the cache.
    CheckTemplates,
    /// Perform a create or adopt.
    Run(ActionRequest),
}

/// Result of a [`Job`].
#[derive(Debug, Clone)]
pub enum TaskPayload {
    TemplatesLoaded(Vec<Template>),
    TemplatesRefreshed(Result<Vec<Template>, String>),
    NewTemplates(Result<usize, String>),
    ActionFinished(Result<ProjectOutcome, String>),
}

/// A payload stamped with the issuing generation.
#[derive(Debug, Clone)]
pub struct TaskMessage {
    pub generation: u64,
    pub payload: TaskPayload,
}

/// Starts jobs. The wizard is generic over this so tests can record jobs
/// instead of running them.
pub trait TaskRunner {
    /// Starts `job`; its single result must be sent on `tx`.
    fn spawn(&self, job: Job, generation: u64, tx: Sender<TaskMessage>);
}

/// Runs each job on a fresh thread with its own tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRunner;

impl TaskRunner for ThreadRunner {
    fn spawn(&self, job: Job, generation: u64, tx: Sender<TaskMessage>) {
        tracing::debug!(?job, generation, "spawning background job");
        std::thread::spawn(move || {
            let payload = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(execute(job)),
                Err(e) => failure(&job, format!("failed to start async runtime: {e}")),
            };
            // The receiver is gone when the wizard was closed; nothing to do.
            let _ = tx.send(TaskMessage {
                generation,
                payload,
            });
        });
    }
}

async fn execute(job: Job) -> TaskPayload {
    match job {
        Job::LoadTemplates => TaskPayload::TemplatesLoaded(match TemplateResolver::from_env() {
            Ok(resolver) => resolver.list_templates().await,
            Err(e) => {
                tracing::warn!(error = %e, "cannot build template resolver");
                embedded_templates()
            }
        }),
        Job::RefreshTemplates => TaskPayload::TemplatesRefreshed(
            refresh().await.map_err(|e| format!("{e:#}")),
        ),
        Job::CheckTemplates => TaskPayload::NewTemplates(
            check().await.map_err(|e| format!("{e:#}")),
        ),
        Job::Run(action) => {
            TaskPayload::ActionFinished(run_action(action).await.map_err(|e| format!("{e}")))
        }
    }
}

fn failure(job: &Job, message: String) -> TaskPayload {
    match job {
        Job::LoadTemplates => TaskPayload::TemplatesLoaded(embedded_templates()),
        Job::RefreshTemplates => TaskPayload::TemplatesRefreshed(Err(message)),
        Job::CheckTemplates => TaskPayload::NewTemplates(Err(message)),
        Job::Run(_) => TaskPayload::ActionFinished(Err(message)),
    }
}

async fn refresh() -> Result<Vec<Template>> {
    Ok(TemplateResolver::from_env()?.update().await?.templates)
}

async fn check() -> Result<usize> {
    TemplateResolver::from_env()?.check_for_new_templates().await
}

/// Resolves the template and performs the create or adopt.
///
/// # Errors
///
/// Returns the first hard failure: template resolution, collision, or I/O.
pub async fn run_action(action: ActionRequest) -> Result<ProjectOutcome> {
    let resolver = TemplateResolver::from_env()?;
    let template = resolver
        .get_template(action.template().unwrap_or(DEFAULT_TEMPLATE))
        .await?;

    match action {
        ActionRequest::Create {
            base_dir,
            name,
            profile,
            ..
        } => create_project(&CreateRequest {
            base_dir,
            name,
            template: template.content,
            profile,
            git: true,
        }),
        ActionRequest::Adopt {
            source,
            base_dir,
            profile,
            ..
        } => adopt_folder(&AdoptRequest {
            source,
            base_dir,
            rename: None,
            template: template.content,
            profile,
        }),
    }
}
