//! History export as JSON or CSV.

use serde::{Deserialize, Serialize};

use crate::error::{EcoPromptError, Result};
use crate::history::PromptRecord;

pub const CSV_HEADER: &str = "Timestamp,Prompt,Tokens,Energy (kWh),Water (ml)";

/// Export formats. Mirrors [`crate::cli::ExportFormatArg`] without the clap
/// dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

pub fn export(records: &[PromptRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(records),
        ExportFormat::Csv => Ok(to_csv(records)),
    }
}

/// Pretty-printed JSON array of records.
pub fn to_json(records: &[PromptRecord]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| EcoPromptError::serialization("exporting history as JSON", e))
}

/// One row per record: total tokens plus real-world energy and water.
pub fn to_csv(records: &[PromptRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for record in records {
        let report = &record.energy_data;
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            record.timestamp.to_rfc3339(),
            csv_field(&record.prompt),
            report.analysis.total_tokens,
            report.energy.real_world_kwh,
            report.energy.real_world_water_ml,
        ));
    }
    out
}

/// Quote a field when it contains a delimiter, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use chrono::{TimeZone, Utc};

    fn records() -> Vec<PromptRecord> {
        let analyzer = Analyzer::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        vec![
            PromptRecord::new(analyzer.analyze("Is Paris the capital of France?"), at),
            PromptRecord::new(analyzer.analyze("Say \"hi\", then\nwrite a poem"), at),
        ]
    }

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn csv_rows() {
        let records = records();
        let csv = to_csv(&records);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        let first = lines.next().unwrap();
        let expected_tokens = records[0].energy_data.analysis.total_tokens.to_string();
        let fields: Vec<&str> = first.split(',').collect();
        assert_eq!(fields[0], "2024-03-01T09:30:00+00:00");
        assert_eq!(fields[1], "Is Paris the capital of France?");
        assert_eq!(fields[2], expected_tokens);
        assert_eq!(
            fields[4],
            records[0].energy_data.energy.real_world_water_ml.to_string()
        );
        assert!(csv.contains("\"Say \"\"hi\"\", then\nwrite a poem\""));
    }

    #[test]
    fn empty_csv_has_header_only() {
        assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn json_roundtrips() {
        let records = records();
        let json = export(&records, ExportFormat::Json).unwrap();
        assert!(json.starts_with("[\n"));
        let parsed: Vec<PromptRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].prompt, records[1].prompt);
        assert_eq!(
            parsed[0].energy_data.analysis.total_tokens,
            records[0].energy_data.analysis.total_tokens
        );
    }
}
