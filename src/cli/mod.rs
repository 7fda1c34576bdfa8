//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. Each writes its output to the
//! supplied writer instead of stdout.

mod catalog;
mod changes;
mod classify;
mod formats;
mod report;

pub use catalog::{run_catalog, run_exceptions};
pub use changes::run_breaking_changes;
pub use classify::{run_classify, Classification};
pub use formats::run_list_output_formats;
pub use report::{parse_target, run_report, ReportArgs};
