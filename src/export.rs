use std::path::Path;

use crate::config::AppConfig;
use crate::issue::NormalizedIssue;
use crate::jira::{FetchError, JiraClient, DEFAULT_FIELDS, DEFAULT_JQL};
use crate::output::WriteError;
use crate::{logging, output, render};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Clone, Copy)]
pub struct ExportSummary {
    pub fetched: usize,
    pub exported: usize,
    pub skipped: usize,
}

/// Runs one full export: fetch the user's unresolved issues, render each
/// through the configured template, and overwrite the output file. Issues
/// without a key are skipped with a warning rather than failing the batch.
pub fn run(config: &AppConfig) -> Result<ExportSummary, ExportError> {
    let client = JiraClient::new(
        &config.jira.api_root,
        &config.jira.username,
        &config.jira.password,
    )?;

    let raw_issues = client.search_issues(DEFAULT_JQL, &DEFAULT_FIELDS)?;
    let fetched = raw_issues.len();

    let mut blocks = Vec::with_capacity(fetched);
    let mut skipped = 0;
    for raw in &raw_issues {
        match NormalizedIssue::from_raw(&client.api_root, raw) {
            Some(issue) => {
                logging::debug(format!("rendering issue {}", issue.key()));
                blocks.push(render::render_issue(&config.output.issue_format, &issue));
            }
            None => {
                skipped += 1;
                logging::warn("skipping search result without an issue key");
            }
        }
    }

    let document = output::assemble_document(config.output.preamble.as_deref(), &blocks);
    output::write_document(Path::new(&config.output.file), &document)?;

    Ok(ExportSummary {
        fetched,
        exported: blocks.len(),
        skipped,
    })
}
