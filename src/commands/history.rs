//! Handler for the `ecoprompt history` command.

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::history::{HistoryStore, PromptRecord};
use crate::output::ml;
use crate::utils;

/// Width of the prompt column in listings.
const PROMPT_WIDTH: usize = 60;

#[derive(Debug)]
pub struct HistoryCommandOptions {
    /// Show only the N most recent records.
    pub limit: Option<usize>,
    pub clear: bool,
    pub quiet: bool,
    pub config: Config,
}

pub fn run(options: HistoryCommandOptions) -> Result<()> {
    let store = HistoryStore::from_config(&options.config)?;

    if options.clear {
        let removed = store.clear()?;
        if !options.quiet {
            println!("{} Cleared {removed} record(s)", "ok".green().bold());
        }
        return Ok(());
    }

    let records = store.load_all()?;
    if records.is_empty() {
        if !options.quiet {
            println!("{}", "No prompts recorded yet.".dimmed());
        }
        return Ok(());
    }

    for line in listing(&records, options.limit) {
        println!("{line}");
    }
    Ok(())
}

/// One line per record, most recent last, limited to the newest `limit`.
fn listing(records: &[PromptRecord], limit: Option<usize>) -> Vec<String> {
    let skip = limit.map_or(0, |n| records.len().saturating_sub(n));
    records
        .iter()
        .skip(skip)
        .map(|record| {
            let report = &record.energy_data;
            format!(
                "{}  {:>7} tokens  {:>10} ml  {}",
                record.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                report.analysis.total_tokens,
                ml(report.energy.real_world_water_ml),
                utils::truncate_prompt(&record.prompt, PROMPT_WIDTH),
            )
        })
        .collect()
}
