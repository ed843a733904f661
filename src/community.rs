//! Community water-usage aggregation.
//!
//! Clients submit their *cumulative* real-world water usage under a
//! pseudonymous id. The receiving [`Ledger`] only adds the increase over
//! the last value seen for that id, so resending the same total is a no-op
//! and a smaller total never decrements the community figure.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EcoPromptError, Result};

const CLIENT_ID_FILE: &str = "client_id";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Running community total plus the last cumulative value per client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub total_ml: f64,
    pub last_submitted: BTreeMap<String, f64>,
}

impl Ledger {
    /// Apply a cumulative submission and return the delta added.
    pub fn submit(&mut self, id: &str, cumulative_ml: f64) -> Result<f64> {
        if id.trim().is_empty() {
            return Err(EcoPromptError::validation("id", "must not be empty"));
        }
        if !cumulative_ml.is_finite() || cumulative_ml < 0.0 {
            return Err(EcoPromptError::validation(
                "totalWaterMl",
                format!("must be a non-negative number (got {cumulative_ml})"),
            ));
        }

        let last = self.last_submitted.get(id).copied().unwrap_or(0.0);
        let delta = (cumulative_ml - last).max(0.0);
        self.total_ml += delta;
        self.last_submitted
            .insert(id.to_string(), last.max(cumulative_ml));
        debug!(id, delta, total = self.total_ml, "applied submission");
        Ok(delta)
    }

    pub fn contributors(&self) -> usize {
        self.last_submitted.len()
    }
}

/// A [`Ledger`] persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger; a missing file is an empty ledger.
    pub fn load(&self) -> Result<Ledger> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                EcoPromptError::serialization(
                    format!("reading ledger '{}'", self.path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Ledger::default()),
            Err(e) => Err(EcoPromptError::io(
                format!("reading ledger '{}'", self.path.display()),
                e,
            )),
        }
    }

    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)
            .map_err(|e| EcoPromptError::serialization("encoding ledger", e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                EcoPromptError::io(format!("creating ledger directory '{}'", parent.display()), e)
            })?;
        }
        std::fs::write(&self.path, json).map_err(|e| {
            EcoPromptError::io(format!("writing ledger '{}'", self.path.display()), e)
        })
    }

    /// Load, apply one submission, save. Returns the updated ledger and
    /// the delta that was added.
    pub fn submit(&self, id: &str, cumulative_ml: f64) -> Result<(Ledger, f64)> {
        let mut ledger = self.load()?;
        let delta = ledger.submit(id, cumulative_ml)?;
        self.save(&ledger)?;
        Ok((ledger, delta))
    }
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Body of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub total_water_ml: f64,
}

/// Posts submissions to a remote aggregation endpoint.
pub struct CommunityClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl CommunityClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(EcoPromptError::validation(
                "endpoint",
                format!("'{endpoint}' is not an http(s) URL"),
            ));
        }
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("ecoprompt/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EcoPromptError::network(format!("building HTTP client: {e}")))?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit a cumulative total. Failures are logged and reported as
    /// `false`, never returned as errors.
    pub fn submit(&self, id: &str, total_water_ml: f64) -> bool {
        match self.try_submit(id, total_water_ml) {
            Ok(()) => {
                info!(endpoint = %self.endpoint, "submitted water usage");
                true
            }
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "submission failed");
                false
            }
        }
    }

    fn try_submit(&self, id: &str, total_water_ml: f64) -> Result<()> {
        let body = Submission {
            id: id.to_string(),
            total_water_ml,
        };
        self.http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| EcoPromptError::network(e.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Client id
// ---------------------------------------------------------------------------

/// Pseudonymous id for this installation, created on first use and
/// stored in `data_dir`.
pub fn client_id(data_dir: &Path) -> Result<String> {
    let path = data_dir.join(CLIENT_ID_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            if let Ok(id) = Uuid::parse_str(content.trim()) {
                return Ok(id.to_string());
            }
            warn!(path = %path.display(), "client id file is invalid, generating a new id");
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(EcoPromptError::io(
                format!("reading client id '{}'", path.display()),
                e,
            ))
        }
    }

    let id = Uuid::new_v4().to_string();
    std::fs::create_dir_all(data_dir).map_err(|e| {
        EcoPromptError::io(format!("creating data directory '{}'", data_dir.display()), e)
    })?;
    std::fs::write(&path, &id)
        .map_err(|e| EcoPromptError::io(format!("writing client id '{}'", path.display()), e))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resubmitting_same_total_adds_nothing() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.submit("a", 10.0).unwrap(), 10.0);
        assert_eq!(ledger.submit("a", 10.0).unwrap(), 0.0);
        assert_eq!(ledger.total_ml, 10.0);
    }

    #[test]
    fn increases_add_only_the_delta() {
        let mut ledger = Ledger::default();
        ledger.submit("a", 10.0).unwrap();
        assert_eq!(ledger.submit("a", 15.5).unwrap(), 5.5);
        ledger.submit("b", 4.0).unwrap();
        assert_eq!(ledger.total_ml, 19.5);
        assert_eq!(ledger.contributors(), 2);
    }

    #[test]
    fn smaller_total_never_decrements() {
        let mut ledger = Ledger::default();
        ledger.submit("a", 10.0).unwrap();
        assert_eq!(ledger.submit("a", 3.0).unwrap(), 0.0);
        assert_eq!(ledger.total_ml, 10.0);
        assert_eq!(ledger.last_submitted["a"], 10.0);
        // growth is measured from the high-water mark
        assert_eq!(ledger.submit("a", 12.0).unwrap(), 2.0);
    }

    #[test]
    fn rejects_invalid_submissions() {
        let mut ledger = Ledger::default();
        assert!(ledger.submit("a", -1.0).is_err());
        assert!(ledger.submit("a", f64::INFINITY).is_err());
        assert!(ledger.submit("  ", 1.0).is_err());
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn ledger_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let file = LedgerFile::new(dir.path().join("ledger.json"));
        assert_eq!(file.load().unwrap(), Ledger::default());
        let (_, delta) = file.submit("a", 8.0).unwrap();
        assert_eq!(delta, 8.0);
        let (ledger, delta) = file.submit("a", 8.0).unwrap();
        assert_eq!(delta, 0.0);
        assert_eq!(ledger.total_ml, 8.0);
        assert_eq!(file.load().unwrap(), ledger);
    }

    #[test]
    fn submission_body_shape() {
        let body = Submission {
            id: "x".into(),
            total_water_ml: 1.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"id": "x", "totalWaterMl": 1.5}));
    }

    #[test]
    fn client_rejects_non_http_endpoint() {
        assert!(CommunityClient::new("not a url").is_err());
    }

    #[test]
    fn unreachable_endpoint_reports_false() {
        // port 9 (discard) on localhost is not expected to accept HTTP
        let client = CommunityClient::new("http://127.0.0.1:9/submit").unwrap();
        assert!(!client.submit("a", 1.0));
    }

    #[test]
    fn client_id_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let first = client_id(dir.path()).unwrap();
        let second = client_id(dir.path()).unwrap();
        assert_eq!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn invalid_client_id_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CLIENT_ID_FILE), "garbage").unwrap();
        let id = client_id(dir.path()).unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
