//! Handler for the `ecoprompt analyze` command.
//!
//! Two modes:
//! - **Single prompt** (argument or all of stdin): one report.
//! - **Lines** (`--lines`): every non-empty stdin line is a prompt; reports
//!   are followed by session totals from a [`SessionAggregator`].
//!
//! Analysed prompts are recorded in history unless `--no-save` is given.

use std::io::Read;
use std::path::PathBuf;

use colored::Colorize;
use tracing::debug;

use crate::aggregate::SessionAggregator;
use crate::analysis::{Analyzer, PromptReport};
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{EcoPromptError, Result};
use crate::history::{HistoryStore, PromptRecord};
use crate::output::{self, ExplanationView, FormatOptions, ReportView};
use crate::utils;

// ---------------------------------------------------------------------------
// Public interface
// ---------------------------------------------------------------------------

/// All inputs needed to run the analyze command.
#[derive(Debug)]
pub struct AnalyzeCommandOptions {
    /// Prompt text; read from stdin when `None`.
    pub prompt: Option<String>,
    pub format: OutputFormat,
    pub out: Option<PathBuf>,
    /// Record prompts in history.
    pub save: bool,
    /// Include the deciding rule and phrases.
    pub explain: bool,
    /// Treat each stdin line as its own prompt.
    pub lines: bool,
    pub quiet: bool,
    pub config: Config,
}

/// Run the analyze command, reading stdin when needed.
pub fn run(options: AnalyzeCommandOptions) -> Result<()> {
    run_with_input(options, &mut std::io::stdin().lock())
}

/// Run the analyze command with an explicit input source.
pub fn run_with_input(options: AnalyzeCommandOptions, input: &mut dyn Read) -> Result<()> {
    let analyzer = Analyzer::from_config(&options.config)?;
    debug!(tokenizer = analyzer.tokenizer_name(), "analyzer ready");

    let prompts = match &options.prompt {
        Some(prompt) => vec![prompt.clone()],
        None => {
            let text = read_input(input)?;
            if options.lines {
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            } else {
                vec![text.trim_end_matches(['\r', '\n']).to_string()]
            }
        }
    };

    let reports: Vec<PromptReport> = prompts.iter().map(|p| analyzer.analyze(p)).collect();

    let format_options = FormatOptions {
        format: utils::cli_format_to_output_format(options.format),
        out: options.out.clone(),
    };
    let views: Vec<ReportView<'_>> = reports
        .iter()
        .map(|report| {
            let view = ReportView::new(report);
            if options.explain {
                let explanation = analyzer.explain(report.prompt());
                view.with_explanation(ExplanationView::new(report, explanation))
            } else {
                view
            }
        })
        .collect();

    let rendered = if options.lines {
        let mut session = SessionAggregator::new();
        reports.iter().for_each(|r| session.record(r));
        output::format_session(&views, session.totals(), format_options.format)?
    } else {
        match views.first() {
            Some(view) => output::format_report(view, format_options.format)?,
            None => String::new(),
        }
    };
    output::write_output(&rendered, &format_options)?;

    if options.save {
        save_reports(&options.config, &reports, options.quiet)?;
    }

    if let Some(path) = &options.out {
        if !options.quiet {
            eprintln!("{} Wrote report to {}", "ok".green().bold(), path.display());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_input(input: &mut dyn Read) -> Result<String> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .map_err(|e| EcoPromptError::io("reading prompt from stdin", e))?;
    Ok(text)
}

/// Append non-blank prompts to history, skipping ones already recorded.
fn save_reports(config: &Config, reports: &[PromptReport], quiet: bool) -> Result<()> {
    let store = HistoryStore::from_config(config)?;
    let mut saved = 0;
    for report in reports.iter().filter(|r| !r.prompt().trim().is_empty()) {
        if store.append(PromptRecord::now(report.clone()))? {
            saved += 1;
        }
    }
    debug!(saved, path = %store.path().display(), "updated history");
    if !quiet && saved > 0 {
        eprintln!(
            "{}",
            format!("saved {saved} prompt(s) to {}", store.path().display()).dimmed()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
