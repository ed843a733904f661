//! Handler for the `ecoprompt share` command.
//!
//! Submits the cumulative real-world water usage of all recorded prompts
//! under this installation's pseudonymous id, either to a remote endpoint
//! or to a local ledger file with the same delta semantics.

use std::path::{Path, PathBuf};

use chrono::Utc;
use colored::Colorize;

use crate::aggregate::{Period, PeriodStats};
use crate::community::{self, CommunityClient, LedgerFile};
use crate::config::Config;
use crate::error::{EcoPromptError, Result};
use crate::history::HistoryStore;
use crate::output::ml;

#[derive(Debug)]
pub struct ShareCommandOptions {
    pub endpoint: Option<String>,
    pub ledger: Option<PathBuf>,
    pub quiet: bool,
    pub config: Config,
}

/// What a successful share did.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    Ledger {
        delta_ml: f64,
        community_total_ml: f64,
        contributors: usize,
    },
    Remote { endpoint: String },
}

pub fn run(options: ShareCommandOptions) -> Result<()> {
    let (total_ml, outcome) = share(&options)?;
    if options.quiet {
        return Ok(());
    }
    match outcome {
        ShareOutcome::Ledger {
            delta_ml,
            community_total_ml,
            contributors,
        } => println!(
            "{} Shared {} ml (added {} ml, community total {} ml from {} contributor(s))",
            "ok".green().bold(),
            ml(total_ml),
            ml(delta_ml),
            ml(community_total_ml),
            contributors
        ),
        ShareOutcome::Remote { endpoint } => println!(
            "{} Shared {} ml with {}",
            "ok".green().bold(),
            ml(total_ml),
            endpoint
        ),
    }
    Ok(())
}

fn share(options: &ShareCommandOptions) -> Result<(f64, ShareOutcome)> {
    let store = HistoryStore::from_config(&options.config)?;
    let records = store.load_all()?;
    let total_ml = PeriodStats::compute(&records, Period::All, Utc::now())
        .totals
        .real_world_water_ml;
    let id = community::client_id(&id_dir(store.path()))?;

    let ledger = options
        .ledger
        .clone()
        .or_else(|| options.config.community.ledger.clone());
    if let Some(path) = ledger {
        let (ledger, delta_ml) = LedgerFile::new(path).submit(&id, total_ml)?;
        return Ok((
            total_ml,
            ShareOutcome::Ledger {
                delta_ml,
                community_total_ml: ledger.total_ml,
                contributors: ledger.contributors(),
            },
        ));
    }

    let endpoint = options
        .endpoint
        .clone()
        .or_else(|| options.config.community.endpoint.clone())
        .ok_or_else(|| {
            EcoPromptError::validation(
                "endpoint",
                "no community endpoint configured (pass --endpoint or --ledger)",
            )
        })?;
    let client = CommunityClient::new(endpoint)?;
    if !client.submit(&id, total_ml) {
        return Err(EcoPromptError::network(format!(
            "submission to '{}' failed",
            client.endpoint()
        )));
    }
    Ok((
        total_ml,
        ShareOutcome::Remote {
            endpoint: client.endpoint().to_string(),
        },
    ))
}

/// The client id lives next to the history file.
fn id_dir(history_path: &Path) -> PathBuf {
    history_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
