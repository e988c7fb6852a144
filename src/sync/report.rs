//! Run report
//!
//! Tallies how each sitemap URL was resolved during a run and prints the
//! summary shown at the end of the command.

use crate::state::UrlOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Summary of a single sync run
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Number of URLs the sitemap declared
    pub sitemap_urls: usize,

    /// Size of the processed set when the run started
    pub previously_processed: usize,

    /// Size of the processed set when it was saved
    pub processed_total: usize,

    /// Count of URLs by outcome
    pub outcomes: HashMap<UrlOutcome, usize>,

    /// Whether the run stopped early on quota exhaustion
    pub halted_on_quota: bool,

    /// Distinct unprocessed URLs a quota halt left behind, including the one
    /// that hit the quota
    pub left_for_next_run: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SyncReport {
    pub fn new(sitemap_urls: usize, previously_processed: usize) -> Self {
        Self {
            sitemap_urls,
            previously_processed,
            processed_total: previously_processed,
            outcomes: HashMap::new(),
            halted_on_quota: false,
            left_for_next_run: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records the outcome of one URL
    pub fn record(&mut self, outcome: UrlOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        if outcome.halts_run() {
            self.halted_on_quota = true;
        }
    }

    /// Records how many unprocessed URLs remain after a quota halt
    pub fn left_over(&mut self, remaining: usize) {
        self.left_for_next_run = remaining;
    }

    /// Stamps the report with the final processed-set size
    pub fn finish(&mut self, processed_total: usize) {
        self.processed_total = processed_total;
        self.finished_at = Some(Utc::now());
    }

    /// Returns how many URLs ended with `outcome`
    pub fn count(&self, outcome: UrlOutcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Returns how many sitemap entries were looked at, including skips
    pub fn visited(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Returns how many sitemap entries the run never reached
    pub fn unvisited(&self) -> usize {
        self.sitemap_urls.saturating_sub(self.visited())
    }

    /// Returns how many URLs this run added to the processed set
    pub fn newly_processed(&self) -> usize {
        self.processed_total.saturating_sub(self.previously_processed)
    }
}

/// Prints a report to stdout in a formatted manner
pub fn print_report(report: &SyncReport) {
    println!("=== Sync Report ===\n");

    println!("Overview:");
    println!("  URLs in sitemap: {}", report.sitemap_urls);
    println!("  Previously processed: {}", report.previously_processed);
    println!("  Newly processed: {}", report.newly_processed());
    println!("  Processed total: {}", report.processed_total);
    println!();

    println!("URLs by Outcome:");
    let mut outcome_counts: Vec<_> = report.outcomes.iter().collect();
    outcome_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    for (outcome, count) in outcome_counts {
        println!("  {}: {}", outcome, count);
    }
    println!();

    if report.halted_on_quota {
        println!(
            "Quota exceeded: stopped with {} URL(s) left for the next run",
            report.left_for_next_run
        );
    }

    if let Some(finished_at) = report.finished_at {
        let elapsed = finished_at - report.started_at;
        println!("Finished in {:.1}s", elapsed.num_milliseconds() as f64 / 1000.0);
    }
}
