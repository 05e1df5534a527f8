use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write output file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Joins the preamble (if any) and the rendered blocks into one document,
/// separating sections with a single blank line. Empty blocks are skipped so
/// an issue whose template lines all dropped leaves no gap behind.
pub fn assemble_document(preamble: Option<&str>, blocks: &[String]) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(preamble) = preamble {
        let trimmed = preamble.trim_end();
        if !trimmed.is_empty() {
            sections.push(format!("{trimmed}\n"));
        }
    }

    for block in blocks {
        if !block.is_empty() {
            sections.push(block.clone());
        }
    }

    sections.join("\n")
}

/// Replaces the file at `path` with `contents` in one write. Callers only
/// reach this once fetching and rendering have fully succeeded, so a failed
/// export never truncates the previous output.
pub fn write_document(path: &Path, contents: &str) -> Result<(), WriteError> {
    std::fs::write(path, contents).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
