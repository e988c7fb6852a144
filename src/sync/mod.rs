//! Sync module
//!
//! This module contains the run orchestration:
//! - The per-URL state machine and run loop
//! - The report produced at the end of each run

mod coordinator;
mod report;

pub use coordinator::{pending_urls, Coordinator, SyncSettings};
pub use report::{print_report, SyncReport};
