use std::path::PathBuf;

use jira_outline::{config, export, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args_os();
    let _program = args.next();
    let cfg = match args.next() {
        Some(path) => config::load_from(&PathBuf::from(path))?,
        None => config::load()?,
    };

    if cfg.logging.debug {
        logging::enable_debug();
    }

    logging::info(format!("exporting open issues from {}", cfg.jira.api_root));
    let summary = export::run(&cfg)?;
    logging::info(format!(
        "exported {} of {} issues to {} ({} skipped)",
        summary.exported, summary.fetched, cfg.output.file, summary.skipped
    ));

    Ok(())
}
