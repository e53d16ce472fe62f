//! Wizard flows.
//!
//! A [`Flow`] names the steps a wizard walks through and turns the collected
//! [`WizardData`] into the final [`ActionRequest`]. The wizard engine itself
//! knows nothing about creating or adopting.

use std::path::PathBuf;

use anyhow::Result;

use super::tasks::ActionRequest;
use crate::errors::IrlError;
use crate::project::generate_name_today;
use crate::settings::Profile;

/// A wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Confirm or browse for the workspace directory.
    Directory,
    /// Browse for the folder to adopt.
    Source,
    /// Type the project purpose.
    Purpose,
    /// Pick a template.
    Template,
    /// Background action running.
    Working,
    /// Result screen.
    Done,
}

/// Values collected while walking the steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardData {
    /// Workspace the project goes into.
    pub directory: Option<PathBuf>,
    /// Folder to adopt.
    pub source: Option<PathBuf>,
    pub purpose: String,
    /// Chosen template, `None` for the default.
    pub template: Option<String>,
    pub profile: Profile,
}

pub trait Flow {
    /// Heading shown above every step.
    fn title(&self) -> &'static str;

    /// Steps in order. Always ends with `Working` then `Done`.
    fn steps(&self) -> &'static [Step];

    /// Folder name the action will produce, if it can be known yet.
    fn target_name(&self, data: &WizardData) -> Option<String>;

    /// Builds the action, rejecting hard errors before anything runs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for missing inputs, `AlreadyExists` for a
    /// taken destination, and `AlreadyInWorkspace` for an adopt source that
    /// is already inside the workspace.
    fn prepare_action(&self, data: &WizardData) -> Result<ActionRequest>;
}

/// New project: workspace, purpose, template.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitFlow;

const INIT_STEPS: &[Step] = &[
    Step::Directory,
    Step::Purpose,
    Step::Template,
    Step::Working,
    Step::Done,
];

impl Flow for InitFlow {
    fn title(&self) -> &'static str {
        "New project"
    }

    fn steps(&self) -> &'static [Step] {
        INIT_STEPS
    }

    fn target_name(&self, data: &WizardData) -> Option<String> {
        Some(generate_name_today(&data.purpose))
    }

    fn prepare_action(&self, data: &WizardData) -> Result<ActionRequest> {
        let base_dir = require_directory(data)?;
        let name = generate_name_today(&data.purpose);
        let target = base_dir.join(&name);
        if target.exists() {
            return Err(IrlError::already_exists(target).into());
        }
        Ok(ActionRequest::Create {
            base_dir,
            name,
            template: data.template.clone(),
            profile: data.profile.clone(),
        })
    }
}

/// Adopt an existing folder: source, template. The workspace comes from
/// the configured default directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdoptFlow;

const ADOPT_STEPS: &[Step] = &[Step::Source, Step::Template, Step::Working, Step::Done];

impl Flow for AdoptFlow {
    fn title(&self) -> &'static str {
        "Adopt folder"
    }

    fn steps(&self) -> &'static [Step] {
        ADOPT_STEPS
    }

    fn target_name(&self, data: &WizardData) -> Option<String> {
        data.source
            .as_ref()?
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn prepare_action(&self, data: &WizardData) -> Result<ActionRequest> {
        let base_dir = require_directory(data)?;
        let source = data
            .source
            .clone()
            .ok_or_else(|| IrlError::config_error("no folder selected to adopt"))?;

        if let (Ok(source), Ok(workspace)) = (
            std::fs::canonicalize(&source),
            std::fs::canonicalize(&base_dir),
        ) && source.starts_with(&workspace)
        {
            return Err(IrlError::already_in_workspace(source, workspace).into());
        }

        let name = self
            .target_name(data)
            .ok_or_else(|| IrlError::invalid_arguments("source folder has no name"))?;
        let target = base_dir.join(name);
        if target.exists() {
            return Err(IrlError::already_exists(target).into());
        }

        Ok(ActionRequest::Adopt {
            source,
            base_dir,
            template: data.template.clone(),
            profile: data.profile.clone(),
        })
    }
}

fn require_directory(data: &WizardData) -> Result<PathBuf> {
    data.directory.clone().ok_or_else(|| {
        IrlError::config_error(
            "no default directory configured. Run 'irl config set-dir <PATH>' first.",
        )
        .into()
    })
}
