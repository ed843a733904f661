use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use ecoprompt::cli::{Cli, ColorMode, Command};
use ecoprompt::commands;
use ecoprompt::commands::analyze::AnalyzeCommandOptions;
use ecoprompt::commands::energy::EnergyCommandOptions;
use ecoprompt::commands::export::ExportCommandOptions;
use ecoprompt::commands::history::HistoryCommandOptions;
use ecoprompt::commands::init::{InitOptions, InitResult};
use ecoprompt::commands::share::ShareCommandOptions;
use ecoprompt::commands::stats::StatsCommandOptions;
use ecoprompt::config::Config;
use ecoprompt::utils;

fn main() {
    let cli = Cli::parse();

    // Configure color output
    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    // Init tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let load = || -> Result<Config> {
        utils::load_config(cli.config.as_deref(), cli.history.clone())
            .context("failed to load configuration")
    };

    match cli.command {
        Command::Init {
            ref root,
            ref config,
            force,
        } => {
            let root = resolve_root(root.clone())?;
            let result = commands::init::run(InitOptions {
                root,
                config_path: config.clone().or_else(|| cli.config.clone()),
                force,
            })?;
            if !cli.quiet {
                print_init_result(&result);
            }
        }
        Command::Analyze {
            ref prompt,
            format,
            ref out,
            no_save,
            explain,
            lines,
        } => commands::analyze::run(AnalyzeCommandOptions {
            prompt: prompt.clone(),
            format,
            out: out.clone(),
            save: !no_save,
            explain,
            lines,
            quiet: cli.quiet,
            config: load()?,
        })?,
        Command::Energy {
            tokens,
            complexity,
            reasoning,
            openness,
            format,
        } => commands::energy::run(EnergyCommandOptions {
            tokens,
            complexity,
            reasoning,
            openness,
            format,
            config: load()?,
        })?,
        Command::History { limit, clear } => commands::history::run(HistoryCommandOptions {
            limit,
            clear,
            quiet: cli.quiet,
            config: load()?,
        })?,
        Command::Stats { period, json } => commands::stats::run(StatsCommandOptions {
            period: utils::cli_period(period),
            json,
            config: load()?,
        })?,
        Command::Export { format, ref out } => commands::export::run(ExportCommandOptions {
            format: utils::cli_export_format(format),
            out: out.clone(),
            quiet: cli.quiet,
            config: load()?,
        })?,
        Command::Share {
            ref endpoint,
            ref ledger,
        } => commands::share::run(ShareCommandOptions {
            endpoint: endpoint.clone(),
            ledger: ledger.clone(),
            quiet: cli.quiet,
            config: load()?,
        })?,
    }
    Ok(())
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(p) => Ok(p),
        None => std::env::current_dir().context("getting current directory"),
    }
}

fn print_init_result(result: &InitResult) {
    let verb = if result.overwritten { "Overwrote" } else { "Created" };
    println!(
        "{} {verb} config at {}",
        "ok".green().bold(),
        result.config_path.display()
    );
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit {} to tune the estimator and energy coefficients",
        "ecoprompt.toml".bold()
    );
    println!(
        "  2. Run {} to estimate a prompt",
        "ecoprompt analyze \"...\"".bold()
    );
    println!("  3. Run {} to see your totals", "ecoprompt stats".bold());
}
