//! Template resolution over cache, remote source and embedded set.

use std::collections::HashSet;

use anyhow::Result;

use super::cache::TemplateCache;
use super::embedded::{embedded_template, embedded_templates};
use super::remote::{CHECK_TIMEOUT, FETCH_TIMEOUT, GithubSource, RemoteEntry, TemplateSource};
use super::{Template, TemplateMeta, is_safe_name};
use crate::errors::IrlError;
use crate::settings::IrlPaths;

/// Outcome of a remote fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Templates downloaded and written to the cache.
    pub templates: Vec<Template>,
    /// Names listed remotely whose download failed.
    pub skipped: Vec<String>,
}

/// Resolves templates through the cache, a [`TemplateSource`], and the
/// embedded set.
#[derive(Debug, Clone)]
pub struct TemplateResolver<S> {
    cache: TemplateCache,
    source: S,
}

impl TemplateResolver<GithubSource> {
    /// Creates a resolver over the default cache location and the
    /// environment-configured remote source.
    ///
    /// # Errors
    ///
    /// Returns an error if paths cannot be resolved or the HTTP client
    /// cannot be built.
    pub fn from_env() -> Result<Self> {
        let paths = IrlPaths::new()?;
        Ok(Self::new(
            TemplateCache::new(paths.templates_cache),
            GithubSource::from_env()?,
        ))
    }
}

impl<S: TemplateSource> TemplateResolver<S> {
    #[must_use]
    pub fn new(cache: TemplateCache, source: S) -> Self {
        Self { cache, source }
    }

    /// The cache this resolver reads and writes.
    #[must_use]
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Lists available templates. Never fails.
    ///
    /// A fresh cache is returned without touching the network. Otherwise a
    /// remote fetch is attempted, and when that fails or yields nothing the
    /// embedded set is returned.
    pub async fn list_templates(&self) -> Vec<Template> {
        if self.cache.is_fresh()
            && let Some(templates) = self.cache.load()
        {
            tracing::debug!(count = templates.len(), "templates served from cache");
            return templates;
        }

        match self.fetch_templates().await {
            Ok(report) if !report.templates.is_empty() => return report.templates,
            Ok(_) => tracing::warn!("remote listing held no templates, using embedded set"),
            Err(e) => tracing::warn!(error = %e, "template fetch failed, using embedded set"),
        }
        embedded_templates()
    }

    /// Resolves a single template by name.
    ///
    /// Looks in the cache (fresh or stale), then the embedded set, then
    /// downloads the template's direct content URL.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no source has the template.
    pub async fn get_template(&self, name: &str) -> Result<Template> {
        let not_found = || IrlError::not_found(format!("template '{name}'"));

        if !is_safe_name(name) {
            return Err(not_found().into());
        }
        if let Some(template) = self.cache.load_template(name) {
            return Ok(template);
        }
        if let Some(template) = embedded_template(name) {
            return Ok(template);
        }

        let url = self.source.content_url(name);
        match self.source.download(&url).await {
            Ok(content) => {
                if let Err(e) = self.cache.write_content(name, &content) {
                    tracing::warn!(error = %e, template = name, "could not cache template");
                }
                Ok(Template::new(name, content))
            }
            Err(e) => {
                tracing::debug!(error = %e, template = name, "direct template download failed");
                Err(not_found().into())
            }
        }
    }

    /// Downloads every remote Markdown template and rewrites the cache.
    ///
    /// Per-file download failures are skipped and reported by name. The
    /// index is only rewritten when at least one template was fetched, so a
    /// failed refresh never empties a previously good cache.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the listing cannot be retrieved or decoded.
    pub async fn fetch_templates(&self) -> Result<FetchReport> {
        let entries = self.source.list_entries(FETCH_TIMEOUT).await?;
        let mut report = FetchReport::default();

        for entry in &entries {
            let Some(name) = entry.template_name() else {
                continue;
            };
            if !is_safe_name(name) {
                tracing::warn!(template = name, "skipping template with unusable name");
                report.skipped.push(name.to_string());
                continue;
            }

            let url = entry
                .download_url
                .clone()
                .unwrap_or_else(|| self.source.content_url(name));
            match self.source.download(&url).await {
                Ok(content) => {
                    if let Err(e) = self.cache.write_content(name, &content) {
                        tracing::warn!(error = %e, template = name, "could not cache template");
                    }
                    report.templates.push(Template::new(name, content));
                }
                Err(e) => {
                    tracing::warn!(error = %e, template = name, "template download failed");
                    report.skipped.push(name.to_string());
                }
            }
        }

        if !report.templates.is_empty() {
            let index: Vec<TemplateMeta> = report.templates.iter().map(Template::meta).collect();
            if let Err(e) = self.cache.write_index(&index) {
                tracing::warn!(error = %e, "could not write template index");
            }
        }

        tracing::info!(
            fetched = report.templates.len(),
            skipped = report.skipped.len(),
            "template fetch finished"
        );
        Ok(report)
    }

    /// Forces a refresh of the cache.
    ///
    /// # Errors
    ///
    /// Same as [`TemplateResolver::fetch_templates`].
    pub async fn update(&self) -> Result<FetchReport> {
        self.fetch_templates().await
    }

    /// Counts remote templates that are not in the cache index.
    ///
    /// Only the listing is requested; no content is downloaded.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on network failure or when the check exceeds
    /// its short timeout.
    pub async fn check_for_new_templates(&self) -> Result<usize> {
        let entries = tokio::time::timeout(CHECK_TIMEOUT, self.source.list_entries(CHECK_TIMEOUT))
            .await
            .map_err(|_| IrlError::fetch("template check timed out"))??;

        let cached: HashSet<String> = self.cache.cached_names().into_iter().collect();
        let remote: HashSet<&str> = entries
            .iter()
            .filter_map(RemoteEntry::template_name)
            .collect();
        Ok(remote.iter().filter(|name| !cached.contains(**name)).count())
    }
}
