//! Handler for the `ecoprompt export` command.

use std::path::PathBuf;

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::history::HistoryStore;
use crate::output::{self, Format, FormatOptions};

#[derive(Debug)]
pub struct ExportCommandOptions {
    pub format: ExportFormat,
    pub out: Option<PathBuf>,
    pub quiet: bool,
    pub config: Config,
}

pub fn run(options: ExportCommandOptions) -> Result<()> {
    let store = HistoryStore::from_config(&options.config)?;
    let records = store.load_all()?;
    let mut content = export::export(&records, options.format)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    output::write_output(
        &content,
        &FormatOptions {
            // only the destination matters for pre-rendered content
            format: Format::Plain,
            out: options.out.clone(),
        },
    )?;

    if let Some(path) = &options.out {
        if !options.quiet {
            eprintln!(
                "{} Exported {} record(s) as {} to {}",
                "ok".green().bold(),
                records.len(),
                options.format.extension(),
                path.display()
            );
        }
    }
    Ok(())
}
