//! Persisted prompt history.
//!
//! Records live in one pretty-printed JSON array. History is append-only:
//! a record is written once per unique prompt text and only removed by
//! [`HistoryStore::clear`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::PromptReport;
use crate::config::Config;
use crate::error::{EcoPromptError, Result};

/// One analysed prompt as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    pub timestamp: DateTime<Utc>,
    pub prompt: String,
    pub energy_data: PromptReport,
}

impl PromptRecord {
    pub fn new(report: PromptReport, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            prompt: report.prompt().to_string(),
            energy_data: report,
        }
    }

    pub fn now(report: PromptReport) -> Self {
        Self::new(report, Utc::now())
    }
}

/// JSON-file record store.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or `history.json` in the data dir.
    pub fn from_config(config: &Config) -> Result<Self> {
        config
            .history_path()
            .map(Self::new)
            .ok_or_else(|| EcoPromptError::history("no data directory available; pass --history"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, oldest first. A missing file is an empty history; a
    /// malformed one is logged and treated as empty.
    pub fn load_all(&self) -> Result<Vec<PromptRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(EcoPromptError::io(
                    format!("reading history from '{}'", self.path.display()),
                    e,
                ))
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Vec<PromptRecord>>(&content) {
            Ok(mut records) => {
                for record in &mut records {
                    record.energy_data.analysis.raw_text = record.prompt.clone();
                }
                Ok(records)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "history file is malformed, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Append `record` unless a record with the same prompt text exists.
    /// Returns whether the record was written.
    pub fn append(&self, record: PromptRecord) -> Result<bool> {
        let mut records = self.load_all()?;
        if records.iter().any(|r| r.prompt == record.prompt) {
            debug!("prompt already in history, skipping");
            return Ok(false);
        }
        records.push(record);
        self.write(&records)?;
        Ok(true)
    }

    /// Delete every record.
    pub fn clear(&self) -> Result<usize> {
        let count = self.load_all()?.len();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(count),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(EcoPromptError::io(
                format!("removing history '{}'", self.path.display()),
                e,
            )),
        }
    }

    fn write(&self, records: &[PromptRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| EcoPromptError::serialization("encoding history", e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                EcoPromptError::io(format!("creating history directory '{}'", parent.display()), e)
            })?;
        }
        std::fs::write(&self.path, json).map_err(|e| {
            EcoPromptError::io(format!("writing history to '{}'", self.path.display()), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;

    fn record(text: &str) -> PromptRecord {
        PromptRecord::now(Analyzer::default().analyze(text))
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("nested/history.json"));
        assert!(store.append(record("Explain how vaccines work")).unwrap());
        assert!(store.append(record("Write a haiku about autumn")).unwrap());
        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].prompt, "Explain how vaccines work");
        assert_eq!(loaded[0].energy_data.prompt(), "Explain how vaccines work");
    }

    #[test]
    fn duplicate_prompt_is_not_appended() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        assert!(store.append(record("same prompt")).unwrap());
        assert!(!store.append(record("same prompt")).unwrap());
        assert!(store.append(record("Same prompt")).unwrap());
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn malformed_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = HistoryStore::new(&path);
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.append(record("fresh start")).unwrap());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        store.append(record("one")).unwrap();
        store.append(record("two")).unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.clear().unwrap(), 0);
    }

    #[test]
    fn file_uses_camel_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);
        store.append(record("Is Paris the capital of France?")).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let first = &json[0];
        assert!(first["timestamp"].is_string());
        assert_eq!(first["prompt"], "Is Paris the capital of France?");
        assert!(first["energyData"]["realWorldWaterUsageMl"].is_number());
    }
}
