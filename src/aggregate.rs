//! Session totals and period statistics.
//!
//! [`SessionAggregator`] accumulates figures for prompts analysed in one
//! run; it is an ordinary value owned by the caller. [`PeriodStats`] is
//! recomputed from the full record list on every call and never cached.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::PromptReport;
use crate::history::PromptRecord;

// ---------------------------------------------------------------------------
// Running totals
// ---------------------------------------------------------------------------

/// Sums over a set of prompt reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub prompts: usize,
    pub prompt_tokens: usize,
    pub response_tokens: usize,
    pub total_tokens: usize,
    #[serde(rename = "directKWh")]
    pub direct_kwh: f64,
    #[serde(rename = "realWorldKWh")]
    pub real_world_kwh: f64,
    pub direct_water_ml: f64,
    pub real_world_water_ml: f64,
}

impl Totals {
    pub fn add(&mut self, report: &PromptReport) {
        let a = &report.analysis;
        let e = &report.energy;
        self.prompts += 1;
        self.prompt_tokens = self.prompt_tokens.saturating_add(a.prompt_tokens);
        self.response_tokens = self
            .response_tokens
            .saturating_add(a.estimated_response_tokens);
        self.total_tokens = self.total_tokens.saturating_add(a.total_tokens);
        self.direct_kwh += e.direct_kwh;
        self.real_world_kwh += e.real_world_kwh;
        self.direct_water_ml += e.direct_water_ml;
        self.real_world_water_ml += e.real_world_water_ml;
    }

    fn average(&self, value: f64) -> f64 {
        if self.prompts == 0 {
            0.0
        } else {
            value / self.prompts as f64
        }
    }

    pub fn average_tokens(&self) -> f64 {
        self.average(self.total_tokens as f64)
    }

    pub fn average_real_world_kwh(&self) -> f64 {
        self.average(self.real_world_kwh)
    }

    pub fn average_real_world_water_ml(&self) -> f64 {
        self.average(self.real_world_water_ml)
    }
}

/// Running totals for prompts analysed in the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionAggregator {
    totals: Totals,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &PromptReport) {
        self.totals.add(report);
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn is_empty(&self) -> bool {
        self.totals.prompts == 0
    }
}

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

/// Time window for [`PeriodStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Since 00:00 UTC today.
    Today,
    /// The last 7 days.
    Week,
    /// The last 30 days.
    Month,
    #[default]
    All,
}

impl Period {
    /// Earliest timestamp inside the window, or `None` for [`Period::All`].
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Today => Some(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
            Self::Week => Some(now - Duration::days(7)),
            Self::Month => Some(now - Duration::days(30)),
            Self::All => None,
        }
    }

    pub fn contains(self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.start(now).is_none_or(|start| timestamp >= start)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "last 7 days",
            Self::Month => "last 30 days",
            Self::All => "all time",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "today" | "day" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown period '{other}', expected today, week, month or all"
            )),
        }
    }
}

/// Statistics over the records that fall inside a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub period: Period,
    #[serde(flatten)]
    pub totals: Totals,
    pub average_tokens: f64,
    #[serde(rename = "averageRealWorldKWh")]
    pub average_real_world_kwh: f64,
    pub average_real_world_water_ml: f64,
}

impl PeriodStats {
    /// Full scan of `records` for the window ending at `now`.
    pub fn compute(records: &[PromptRecord], period: Period, now: DateTime<Utc>) -> Self {
        let mut totals = Totals::default();
        for record in records.iter().filter(|r| period.contains(r.timestamp, now)) {
            totals.add(&record.energy_data);
        }
        Self {
            period,
            average_tokens: totals.average_tokens(),
            average_real_world_kwh: totals.average_real_world_kwh(),
            average_real_world_water_ml: totals.average_real_world_water_ml(),
            totals,
        }
    }
}
