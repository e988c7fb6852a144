//! Sync coordinator - main orchestration logic
//!
//! This module contains the run loop that ties the collaborators together:
//! - Loading the processed set
//! - Fetching the sitemap
//! - Inspecting and, when needed, submitting each unprocessed URL
//! - Saving the processed set

use crate::config::{Config, ErrorPolicy};
use crate::google::{IndexingRequester, StatusChecker};
use crate::sitemap::SitemapSource;
use crate::state::{Classification, SubmitOutcome, UrlOutcome};
use crate::store::{ProcessedSet, UrlStore};
use crate::sync::SyncReport;
use std::collections::HashSet;

/// Run parameters taken from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub sitemap_url: String,
    pub site_property: String,
    pub error_policy: ErrorPolicy,
}

impl SyncSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            sitemap_url: config.sitemap.url.clone(),
            site_property: config.search_console.property.clone(),
            error_policy: config.indexing.on_error,
        }
    }
}

/// Main sync coordinator structure
///
/// Generic over every collaborator so each one can be replaced in tests.
pub struct Coordinator<S, M, C, R> {
    settings: SyncSettings,
    store: S,
    sitemap: M,
    checker: C,
    requester: R,
}

impl<S, M, C, R> Coordinator<S, M, C, R>
where
    S: UrlStore,
    M: SitemapSource,
    C: StatusChecker,
    R: IndexingRequester,
{
    pub fn new(settings: SyncSettings, store: S, sitemap: M, checker: C, requester: R) -> Self {
        Self {
            settings,
            store,
            sitemap,
            checker,
            requester,
        }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Runs one sync pass
    ///
    /// 1. Load the processed set
    /// 2. Fetch the sitemap (any failure aborts before anything is saved)
    /// 3. Resolve each URL in sitemap order
    /// 4. Stop early if the indexing quota runs out
    /// 5. Save the processed set
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReport)` - The run finished or halted on quota; the set was saved
    /// * `Err(IndexerError)` - The store or sitemap failed
    pub async fn run(&self) -> crate::Result<SyncReport> {
        let mut processed = self.store.load()?;
        tracing::info!("Loaded {} processed URLs", processed.len());

        let urls = self.sitemap.fetch(&self.settings.sitemap_url).await?;

        let mut report = SyncReport::new(urls.len(), processed.len());

        for (index, url) in urls.iter().enumerate() {
            let outcome = self.process_url(url, &processed).await;
            tracing::debug!("{} -> {}", url, outcome);
            report.record(outcome);

            if outcome.marks_processed() {
                processed.insert(url.clone());
            }

            if outcome.halts_run() {
                let remaining: HashSet<&String> = urls[index..]
                    .iter()
                    .filter(|u| !processed.contains(*u))
                    .collect();
                report.left_over(remaining.len());
                tracing::warn!(
                    "Quota exceeded (429). Stopping the run; {} URL(s) left for a later retry.",
                    remaining.len()
                );
                break;
            }
        }

        self.store.save(&processed)?;
        report.finish(processed.len());

        tracing::info!(
            "Sync finished: {} visited, {} newly processed, {} processed total",
            report.visited(),
            report.newly_processed(),
            report.processed_total
        );

        Ok(report)
    }

    /// Resolves a single URL
    ///
    /// Never fails: every remote error is mapped to an outcome.
    async fn process_url(&self, url: &str, processed: &ProcessedSet) -> UrlOutcome {
        if processed.contains(url) {
            return UrlOutcome::Skipped;
        }

        match self.checker.inspect(url, &self.settings.site_property).await {
            Classification::Unknown => UrlOutcome::InspectionFailed,
            Classification::Indexed => {
                tracing::debug!("Already indexed: {}", url);
                UrlOutcome::AlreadyIndexed
            }
            Classification::NotIndexed => match self.requester.request_indexing(url).await {
                SubmitOutcome::Submitted => UrlOutcome::Submitted,
                SubmitOutcome::QuotaExceeded => UrlOutcome::QuotaExceeded,
                SubmitOutcome::Failed(e) => {
                    tracing::warn!("Other error for {}: {}", url, e);
                    match self.settings.error_policy {
                        ErrorPolicy::Drop => UrlOutcome::SubmissionFailed,
                        ErrorPolicy::Retry => UrlOutcome::Deferred,
                    }
                }
            },
        }
    }
}

/// Lists the sitemap URLs a run would look at, without contacting Google
///
/// Order follows the sitemap; duplicates are listed once.
pub async fn pending_urls<S, M>(
    store: &S,
    sitemap: &M,
    sitemap_url: &str,
) -> crate::Result<Vec<String>>
where
    S: UrlStore,
    M: SitemapSource,
{
    let processed = store.load()?;
    let urls = sitemap.fetch(sitemap_url).await?;

    let mut seen = HashSet::new();
    Ok(urls
        .into_iter()
        .filter(|url| !processed.contains(url) && seen.insert(url.clone()))
        .collect())
}
