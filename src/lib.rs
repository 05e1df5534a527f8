//! `jira-outline` exports the current user's unresolved Jira issues to a
//! plain-text outline file, one templated block per issue.

/// Runtime configuration loading and validation.
pub mod config;
/// Export pipeline: fetch, normalize, render, write.
pub mod export;
/// Normalized issue records and field extraction.
pub mod issue;
/// Jira search API client.
pub mod jira;
/// Logging helpers used throughout the crate.
pub mod logging;
/// Output document assembly and file writing.
pub mod output;
/// Template rendering for issue blocks.
pub mod render;
