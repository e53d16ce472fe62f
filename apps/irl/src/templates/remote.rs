//! Remote template source.
//!
//! Templates are published as Markdown files in a directory of a GitHub
//! repository. The listing comes from the GitHub contents API, which returns
//! a JSON array of entries:
//!
//! ```json
//! [
//!   {
//!     "name": "experiment.md",
//!     "type": "file",
//!     "download_url": "https://raw.githubusercontent.com/.../experiment.md"
//!   }
//! ]
//! ```
//!
//! Each file's content is then fetched from its `download_url`. Both URLs can
//! be overridden through `IRL_TEMPLATES_URL` and `IRL_TEMPLATES_RAW_URL` for
//! testing or using a mirror.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::errors::IrlError;

/// Environment variable to override the listing URL.
pub const TEMPLATES_URL_ENV: &str = "IRL_TEMPLATES_URL";

/// Environment variable to override the raw content base URL.
pub const TEMPLATES_RAW_URL_ENV: &str = "IRL_TEMPLATES_RAW_URL";

const DEFAULT_LIST_URL: &str =
    "https://api.github.com/repos/irl-tools/irl-templates/contents/templates";

const DEFAULT_RAW_URL: &str =
    "https://raw.githubusercontent.com/irl-tools/irl-templates/main/templates";

/// Request timeout for listing and downloads.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Request timeout for the background "new templates" check.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// User-Agent header for HTTP requests. GitHub rejects requests without one.
const USER_AGENT: &str = concat!("irl/", env!("CARGO_PKG_VERSION"));

/// One entry of a remote listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEntry {
    /// File name including extension.
    pub name: String,
    /// Direct download URL, absent for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl RemoteEntry {
    /// Template name for Markdown entries, `None` for anything else.
    #[must_use]
    pub fn template_name(&self) -> Option<&str> {
        self.name.strip_suffix(".md").filter(|stem| !stem.is_empty())
    }
}

/// Where templates are fetched from.
///
/// Implemented over HTTP by [`GithubSource`]; tests substitute an in-memory
/// source to observe network calls.
pub trait TemplateSource: Send + Sync {
    /// Lists the remote directory.
    fn list_entries(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<RemoteEntry>>> + Send;

    /// Downloads one file's content.
    fn download(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    /// Direct content URL for a template name.
    fn content_url(&self, name: &str) -> String;
}

/// Template source backed by the GitHub contents API.
#[derive(Debug, Clone)]
pub struct GithubSource {
    list_url: String,
    raw_url: String,
    client: reqwest::Client,
}

impl GithubSource {
    /// Creates a source for explicit URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(list_url: impl Into<String>, raw_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            list_url: list_url.into(),
            raw_url: raw_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Creates a source from the environment overrides or the defaults.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        Self::new(
            env_or(TEMPLATES_URL_ENV, DEFAULT_LIST_URL),
            env_or(TEMPLATES_RAW_URL_ENV, DEFAULT_RAW_URL),
        )
    }

    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| IrlError::fetch_with_source(format!("Failed to reach {url}"), e))?;

        if !response.status().is_success() {
            return Err(handle_http_error(response.status(), url));
        }

        response.text().await.map_err(|e| {
            IrlError::fetch_with_source(format!("Failed to read response from {url}"), e).into()
        })
    }
}

impl TemplateSource for GithubSource {
    async fn list_entries(&self, timeout: Duration) -> Result<Vec<RemoteEntry>> {
        let text = self.get_text(&self.list_url, timeout).await?;
        serde_json::from_str(&text).map_err(|e| {
            let message = format!("Failed to parse listing from {}", self.list_url);
            IrlError::fetch_with_source(message, e).into()
        })
    }

    async fn download(&self, url: &str) -> Result<String> {
        self.get_text(url, FETCH_TIMEOUT).await
    }

    fn content_url(&self, name: &str) -> String {
        format!("{}/{name}.md", self.raw_url)
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Maps a non-success status to a `FetchError` with a readable message.
fn handle_http_error(status: reqwest::StatusCode, url: &str) -> anyhow::Error {
    let message = match status.as_u16() {
        403 => format!("Access denied or rate limited: {url}"),
        404 => format!("Template listing not found at {url}"),
        code if code >= 500 => format!("Server error ({code}): {url}"),
        code => format!("HTTP error {code}: {url}"),
    };
    IrlError::fetch(message).into()
}
