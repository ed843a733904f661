//! Shared helpers used across commands: CLI-to-library enum mapping,
//! config loading with command-line overrides, and prompt truncation for
//! one-line listings.

use std::path::{Path, PathBuf};

use crate::aggregate::Period;
use crate::classify::{OpennessLevel, ReasoningLevel};
use crate::cli::{ExportFormatArg, OpennessArg, OutputFormat, PeriodArg, ReasoningArg};
use crate::config::Config;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::output::Format;

// ---------------------------------------------------------------------------
// Enum mapping
// ---------------------------------------------------------------------------

/// Map the clap [`OutputFormat`] to the library [`Format`].
pub fn cli_format_to_output_format(fmt: OutputFormat) -> Format {
    match fmt {
        OutputFormat::Markdown => Format::Markdown,
        OutputFormat::Json => Format::Json,
        OutputFormat::Plain => Format::Plain,
    }
}

pub fn cli_export_format(fmt: ExportFormatArg) -> ExportFormat {
    match fmt {
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Csv => ExportFormat::Csv,
    }
}

pub fn cli_period(period: PeriodArg) -> Period {
    match period {
        PeriodArg::Today => Period::Today,
        PeriodArg::Week => Period::Week,
        PeriodArg::Month => Period::Month,
        PeriodArg::All => Period::All,
    }
}

pub fn cli_reasoning(level: ReasoningArg) -> ReasoningLevel {
    match level {
        ReasoningArg::Simple => ReasoningLevel::Simple,
        ReasoningArg::Moderate => ReasoningLevel::Moderate,
        ReasoningArg::Complex => ReasoningLevel::Complex,
    }
}

pub fn cli_openness(level: OpennessArg) -> OpennessLevel {
    match level {
        OpennessArg::Low => OpennessLevel::Low,
        OpennessArg::Medium => OpennessLevel::Medium,
        OpennessArg::High => OpennessLevel::High,
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Discover and load the config, then apply a `--history` override.
pub fn load_config(config_path: Option<&Path>, history: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::discover(config_path)?;
    if history.is_some() {
        config.history.path = history;
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// First line of `text`, cut to `max_chars` characters with an ellipsis.
pub fn truncate_prompt(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let multi_line = text.trim_end().contains('\n');
    if first_line.chars().count() <= max_chars && !multi_line {
        return first_line.to_string();
    }
    let kept: String = first_line.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
