//! Plan templates: embedded defaults, the local cache, and the remote source.
//!
//! ## Resolution Order
//!
//! [`TemplateResolver::list_templates`] tries, in order:
//!
//! 1. The local cache, when its index is at most 24 hours old
//! 2. A fresh remote fetch, which also rewrites the cache
//! 3. The templates compiled into the binary
//!
//! A stale cache is never returned by the listing; it still serves
//! individual lookups through [`TemplateResolver::get_template`].
//!
//! ## Modules
//!
//! - [`embedded`] - Templates compiled into the binary
//! - [`cache`] - On-disk cache under `~/.irl/cache/templates`
//! - [`remote`] - HTTP template source
//! - [`resolver`] - Fallback chain over the three

pub mod cache;
pub mod embedded;
pub mod remote;
pub mod resolver;

use serde::{Deserialize, Serialize};

pub use cache::TemplateCache;
pub use resolver::TemplateResolver;

/// Description used for templates that have no entry in [`describe`].
pub const GENERIC_DESCRIPTION: &str = "Research plan template";

/// A named plan template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Unique slug, also the cache file stem.
    pub name: String,
    /// One-line human description.
    pub description: String,
    /// Markdown body used for the plan file.
    #[serde(skip)]
    pub content: String,
}

impl Template {
    /// Creates a template, describing it from the static description map.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: describe(&name).to_string(),
            name,
            content: content.into(),
        }
    }

    /// Metadata stored in the cache index.
    #[must_use]
    pub fn meta(&self) -> TemplateMeta {
        TemplateMeta {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Template metadata without content, as stored in `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMeta {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Returns the human description for a known template name.
#[must_use]
pub fn describe(name: &str) -> &'static str {
    match name {
        "default" => "General research plan with purpose, plan, data and outputs",
        "experiment" => "Hypothesis-driven experiment with variables and protocol",
        "literature-review" => "Systematic literature review with search log",
        "data-analysis" => "Analysis of an existing dataset",
        "grant-proposal" => "Funding proposal with aims and budget",
        "thesis" => "Thesis or dissertation chapter plan",
        "meeting-notes" => "Recurring meeting notes and decisions",
        _ => GENERIC_DESCRIPTION,
    }
}

/// True when `name` is usable as a single file stem.
///
/// Rejects empty names, path separators and dot-prefixed names so that
/// remote listings cannot write outside the cache directory.
#[must_use]
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}
