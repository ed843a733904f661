use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "ecoprompt",
    about = "Estimate the energy and water cost of LLM prompts",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the prompt history file
    #[arg(long, global = true, env = "ECOPROMPT_HISTORY")]
    pub history: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default ecoprompt.toml
    Init {
        /// Directory to write the config into
        #[arg(long)]
        root: Option<PathBuf>,

        /// Path to write config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Estimate tokens, energy and water for a prompt
    #[command(alias = "a")]
    Analyze {
        /// Prompt text (read from stdin when omitted)
        prompt: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Write output to file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Do not record the prompt in history
        #[arg(long)]
        no_save: bool,

        /// Show which rule and phrases decided the estimate
        #[arg(long)]
        explain: bool,

        /// Treat each non-empty stdin line as a separate prompt
        #[arg(long, conflicts_with = "prompt")]
        lines: bool,
    },

    /// Run the energy model on a token count directly
    Energy {
        /// Total tokens (prompt plus response)
        #[arg(long, allow_negative_numbers = true)]
        tokens: i64,

        /// Vocabulary complexity in [0, 1]
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        complexity: f64,

        /// Reasoning level
        #[arg(long, value_enum, default_value_t = ReasoningArg::Simple)]
        reasoning: ReasoningArg,

        /// Openness level
        #[arg(long, value_enum, default_value_t = OpennessArg::Low)]
        openness: OpennessArg,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },

    /// List or clear recorded prompts
    #[command(alias = "h")]
    History {
        /// Show only the N most recent records
        #[arg(long)]
        limit: Option<usize>,

        /// Delete all records
        #[arg(long)]
        clear: bool,
    },

    /// Show totals and averages over a time window
    Stats {
        /// Time window
        #[arg(long, value_enum, default_value_t = PeriodArg::All)]
        period: PeriodArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export history as JSON or CSV
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormatArg::Json)]
        format: ExportFormatArg,

        /// Write output to file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Submit your cumulative water usage to a community total
    Share {
        /// Aggregation endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Apply the submission to a local ledger file instead
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Today,
    Week,
    Month,
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReasoningArg {
    Simple,
    Moderate,
    Complex,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OpennessArg {
    Low,
    Medium,
    High,
}
