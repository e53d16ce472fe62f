//! Error types for the irl CLI.
//!
//! This module defines the `IrlError` enum which names every failure class the
//! tool distinguishes. Functions throughout the crate return `anyhow::Result`
//! with an `IrlError` at the root of the chain, so the CLI layer and tests can
//! recover the typed variant with `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

/// Consolidated error type for irl operations.
#[derive(Debug, Error)]
pub enum IrlError {
    /// A named template or path could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing item.
        what: String,
    },

    /// Remote template retrieval failed (network, status or decode).
    #[error("fetch error: {message}")]
    FetchError {
        /// Description of the fetch failure.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error reading or writing files.
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O operation that failed.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A git invocation failed.
    #[error("git error: {message}")]
    GitError {
        /// Description of the git step that failed.
        message: String,
    },

    /// The destination directory is already present.
    #[error("destination already exists: {}", path.display())]
    AlreadyExists {
        /// The conflicting path.
        path: PathBuf,
    },

    /// The folder to adopt is already inside the workspace.
    #[error("{} is already inside the workspace {}", source_dir.display(), workspace.display())]
    AlreadyInWorkspace {
        /// The folder that was to be adopted.
        source_dir: PathBuf,
        /// The configured workspace root.
        workspace: PathBuf,
    },

    /// Required configuration is missing.
    #[error("configuration error: {message}")]
    ConfigError {
        /// Description of the missing or invalid setting.
        message: String,
    },

    /// A JSON document on disk could not be parsed.
    #[error("parse error: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// A directory could not be listed.
    #[error("cannot read directory {}: {source}", path.display())]
    DirectoryError {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid command line arguments.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        /// Description of what was invalid.
        message: String,
    },
}

impl IrlError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Creates a new `FetchError` without an underlying source.
    #[must_use]
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchError {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new `FetchError` wrapping the underlying error.
    #[must_use]
    pub fn fetch_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::FetchError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new `IoError` from an I/O error with context.
    #[must_use]
    pub fn io_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            message: message.into(),
            source,
        }
    }

    /// Creates a new `GitError`.
    #[must_use]
    pub fn git_error(message: impl Into<String>) -> Self {
        Self::GitError {
            message: message.into(),
        }
    }

    /// Creates a new `AlreadyExists` error.
    #[must_use]
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Creates a new `AlreadyInWorkspace` error.
    #[must_use]
    pub fn already_in_workspace(source_dir: impl Into<PathBuf>, workspace: impl Into<PathBuf>) -> Self {
        Self::AlreadyInWorkspace {
            source_dir: source_dir.into(),
            workspace: workspace.into(),
        }
    }

    /// Creates a new `ConfigError`.
    #[must_use]
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a new `ParseError`.
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates a new `DirectoryError`.
    #[must_use]
    pub fn directory_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new `InvalidArguments` error.
    #[must_use]
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Whether a wizard or command may continue past this error with a warning.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::GitError { .. })
    }
}

/// Returns the `IrlError` at the root of an `anyhow` chain, if any.
#[must_use]
pub fn find_irl_error(err: &anyhow::Error) -> Option<&IrlError> {
    err.chain().find_map(|cause| cause.downcast_ref::<IrlError>())
}
