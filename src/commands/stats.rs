//! Handler for the `ecoprompt stats` command: totals and averages over a
//! time window, recomputed from the full history on every run.

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::aggregate::{Period, PeriodStats};
use crate::config::Config;
use crate::error::{EcoPromptError, Result};
use crate::history::HistoryStore;
use crate::output::{kwh, ml};

// ---------------------------------------------------------------------------
// Public interface
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct StatsCommandOptions {
    pub period: Period,
    pub json: bool,
    pub config: Config,
}

pub fn run(options: StatsCommandOptions) -> Result<()> {
    print!("{}", render(&options, Utc::now())?);
    Ok(())
}

fn render(options: &StatsCommandOptions, now: DateTime<Utc>) -> Result<String> {
    let store = HistoryStore::from_config(&options.config)?;
    let records = store.load_all()?;
    let stats = PeriodStats::compute(&records, options.period, now);

    if options.json {
        let mut json = serde_json::to_string_pretty(&stats)
            .map_err(|e| EcoPromptError::serialization("encoding stats", e))?;
        json.push('\n');
        return Ok(json);
    }
    Ok(format_stats(&stats))
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

fn format_stats(stats: &PeriodStats) -> String {
    let t = &stats.totals;
    let mut out = String::new();
    out.push_str(&format!("{}\n", format!("Usage ({})", stats.period).bold()));
    if t.prompts == 0 {
        out.push_str(&format!("  {}\n", "no prompts in this period".dimmed()));
        return out;
    }
    out.push_str(&format!("  prompts:              {}\n", t.prompts));
    out.push_str(&format!("  prompt tokens:        {}\n", t.prompt_tokens));
    out.push_str(&format!("  response tokens:      {}\n", t.response_tokens));
    out.push_str(&format!("  total tokens:         {}\n", t.total_tokens));
    out.push_str(&format!("  direct energy:        {} kWh\n", kwh(t.direct_kwh)));
    out.push_str(&format!("  real-world energy:    {} kWh\n", kwh(t.real_world_kwh)));
    out.push_str(&format!("  direct water:         {} ml\n", ml(t.direct_water_ml)));
    out.push_str(&format!("  real-world water:     {} ml\n", ml(t.real_world_water_ml)));
    out.push_str(&format!("{}\n", "Per prompt".bold()));
    out.push_str(&format!("  tokens:               {:.1}\n", stats.average_tokens));
    out.push_str(&format!(
        "  real-world energy:    {} kWh\n",
        kwh(stats.average_real_world_kwh)
    ));
    out.push_str(&format!(
        "  real-world water:     {} ml\n",
        ml(stats.average_real_world_water_ml)
    ));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::history::PromptRecord;
    use chrono::Duration;

    fn setup(dir: &std::path::Path, now: DateTime<Utc>) -> Config {
        let path = dir.join("history.json");
        let store = HistoryStore::new(&path);
        let analyzer = Analyzer::default();
        store
            .append(PromptRecord::new(analyzer.analyze("recent prompt"), now))
            .unwrap();
        store
            .append(PromptRecord::new(
                analyzer.analyze("old prompt"),
                now - Duration::days(40),
            ))
            .unwrap();
        let mut config = Config::default();
        config.history.path = Some(path);
        config
    }

    #[test]
    fn json_counts_period() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        let config = setup(dir.path(), now);
        let options = StatsCommandOptions {
            period: Period::Month,
            json: true,
            config,
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&options, now).unwrap()).unwrap();
        assert_eq!(parsed["prompts"], 1);
        assert_eq!(parsed["period"], "month");
    }

    #[test]
    fn text_output_for_all_time() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        let options = StatsCommandOptions {
            period: Period::All,
            json: false,
            config: setup(dir.path(), now),
        };
        let out = render(&options, now).unwrap();
        assert!(out.contains("prompts:              2"));
        assert!(out.contains("all time"));
    }

    #[test]
    fn empty_history_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.history.path = Some(dir.path().join("none.json"));
        let options = StatsCommandOptions {
            period: Period::Today,
            json: false,
            config,
        };
        assert!(render(&options, Utc::now()).unwrap().contains("no prompts"));
    }
}
