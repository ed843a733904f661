use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{EcoPromptError, Result};
use crate::tokens::TokenizerKind;

/// File name searched for during config discovery.
pub const CONFIG_FILE_NAME: &str = "ecoprompt.toml";

/// Top-level configuration for EcoPrompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub tokenizer: TokenizerKind,
    pub estimator: EstimatorConfig,
    pub energy: EnergyConfig,
    pub classifier: ClassifierConfig,
    pub history: HistoryConfig,
    pub community: CommunityConfig,
}

/// Tunables of the response-length cascade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Hard floor for every estimate, including empty prompts.
    pub min_response_tokens: usize,
    /// Multiplier for explanation and comments around generated code.
    pub code_overhead: f64,
    /// Cap for code requests, modelling a context window.
    pub code_token_ceiling: usize,
    /// Cap for non-code line-count requests.
    pub line_token_ceiling: usize,
    /// Cap for explicit word, page and list-item counts.
    pub count_token_ceiling: usize,
    pub tokens_per_word: f64,
    pub words_per_page: usize,
}

/// Coefficients of the energy and water model.
///
/// Modifiers are additive into one multiplier (`1 + sum`); the five
/// overhead factors are multiplicative and must each be at least 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    /// kWh per 1000 tokens before any modifier.
    pub base_kwh_per_1k_tokens: f64,
    pub reasoning_simple: f64,
    pub reasoning_moderate: f64,
    pub reasoning_complex: f64,
    pub openness_low: f64,
    pub openness_medium: f64,
    pub openness_high: f64,
    /// Multiplied by vocabulary complexity in [0, 1].
    pub complexity_coefficient: f64,
    /// Complexity at or above which a prompt counts as "high".
    pub complexity_threshold: f64,
    pub inference_overhead_both_high: f64,
    pub inference_overhead_either_high: f64,
    pub inference_overhead_neither: f64,
    /// Datacenter power usage effectiveness.
    pub pue: f64,
    pub idle_factor: f64,
    pub network_factor: f64,
    /// Amortised training cost.
    pub training_factor: f64,
    pub production_factor: f64,
    pub water_ml_per_kwh: f64,
}

/// Extra phrases appended to the built-in classifier tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ClassifierConfig {
    pub extra_complex: Vec<String>,
    pub extra_moderate: Vec<String>,
    pub extra_high_openness: Vec<String>,
    pub extra_medium_openness: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CommunityConfig {
    pub endpoint: Option<String>,
    pub ledger: Option<PathBuf>,
}

// --- Defaults ---

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_response_tokens: 20,
            code_overhead: 1.2,
            code_token_ceiling: 120_000,
            line_token_ceiling: 100_000,
            count_token_ceiling: 100_000,
            tokens_per_word: 1.3,
            words_per_page: 500,
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            base_kwh_per_1k_tokens: 0.0004,
            reasoning_simple: 0.0,
            reasoning_moderate: 0.15,
            reasoning_complex: 0.35,
            openness_low: 0.0,
            openness_medium: 0.1,
            openness_high: 0.2,
            complexity_coefficient: 0.2,
            complexity_threshold: 0.7,
            inference_overhead_both_high: 0.3,
            inference_overhead_either_high: 0.15,
            inference_overhead_neither: 0.05,
            pue: 1.2,
            idle_factor: 1.15,
            network_factor: 1.05,
            training_factor: 1.2,
            production_factor: 1.3,
            water_ml_per_kwh: 1800.0,
        }
    }
}

// --- Validation ---

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_response_tokens == 0 {
            return Err(EcoPromptError::validation(
                "estimator.min_response_tokens",
                "must be greater than 0",
            ));
        }
        if !(self.code_overhead.is_finite() && self.code_overhead >= 1.0) {
            return Err(EcoPromptError::validation(
                "estimator.code_overhead",
                "must be at least 1",
            ));
        }
        if !(self.tokens_per_word.is_finite() && self.tokens_per_word > 0.0) {
            return Err(EcoPromptError::validation(
                "estimator.tokens_per_word",
                "must be positive",
            ));
        }
        if self.words_per_page == 0 {
            return Err(EcoPromptError::validation(
                "estimator.words_per_page",
                "must be greater than 0",
            ));
        }
        if self.code_token_ceiling < self.min_response_tokens
            || self.line_token_ceiling < self.min_response_tokens
            || self.count_token_ceiling < self.min_response_tokens
        {
            return Err(EcoPromptError::validation(
                "estimator.code_token_ceiling",
                "ceilings must not be below min_response_tokens",
            ));
        }
        Ok(())
    }
}

impl EnergyConfig {
    /// The five real-world overhead factors, in application order.
    pub fn overhead_factors(&self) -> [(&'static str, f64); 5] {
        [
            ("pue", self.pue),
            ("idle_factor", self.idle_factor),
            ("network_factor", self.network_factor),
            ("training_factor", self.training_factor),
            ("production_factor", self.production_factor),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("base_kwh_per_1k_tokens", self.base_kwh_per_1k_tokens),
            ("reasoning_simple", self.reasoning_simple),
            ("reasoning_moderate", self.reasoning_moderate),
            ("reasoning_complex", self.reasoning_complex),
            ("openness_low", self.openness_low),
            ("openness_medium", self.openness_medium),
            ("openness_high", self.openness_high),
            ("complexity_coefficient", self.complexity_coefficient),
            ("inference_overhead_both_high", self.inference_overhead_both_high),
            ("inference_overhead_either_high", self.inference_overhead_either_high),
            ("inference_overhead_neither", self.inference_overhead_neither),
            ("water_ml_per_kwh", self.water_ml_per_kwh),
        ];
        for (name, value) in rates {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EcoPromptError::validation(
                    format!("energy.{name}"),
                    "must be a non-negative number",
                ));
            }
        }
        for (name, value) in self.overhead_factors() {
            if !(value.is_finite() && value >= 1.0) {
                return Err(EcoPromptError::validation(
                    format!("energy.{name}"),
                    "overhead factors must be at least 1",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.complexity_threshold) {
            return Err(EcoPromptError::validation(
                "energy.complexity_threshold",
                "must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

// --- Config methods ---

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EcoPromptError::io(format!("reading config from '{}'", path.display()), e)
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| EcoPromptError::config_with_source("failed to parse config", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the discovered config file, or defaults when there is none.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            if !p.exists() {
                return Err(EcoPromptError::config(format!(
                    "config file '{}' not found",
                    p.display()
                )));
            }
        }
        match find_config_file(explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| EcoPromptError::config_with_source("failed to serialize config", e))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EcoPromptError::io(
                    format!("creating config directory '{}'", parent.display()),
                    e,
                )
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            EcoPromptError::io(format!("writing config to '{}'", path.display()), e)
        })
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<()> {
        self.estimator.validate()?;
        self.energy.validate()?;
        if let Some(endpoint) = &self.community.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(EcoPromptError::validation(
                    "community.endpoint",
                    "must be an http(s) URL",
                ));
            }
        }
        Ok(())
    }

    /// Merge overrides on top of this config (non-default fields win).
    pub fn merge(&mut self, overrides: Config) {
        let defaults = Config::default();
        if overrides.tokenizer != defaults.tokenizer {
            self.tokenizer = overrides.tokenizer;
        }
        if overrides.estimator != defaults.estimator {
            self.estimator = overrides.estimator;
        }
        if overrides.energy != defaults.energy {
            self.energy = overrides.energy;
        }
        if overrides.classifier != defaults.classifier {
            self.classifier = overrides.classifier;
        }
        if overrides.history.path.is_some() {
            self.history.path = overrides.history.path;
        }
        if overrides.community.endpoint.is_some() {
            self.community.endpoint = overrides.community.endpoint;
        }
        if overrides.community.ledger.is_some() {
            self.community.ledger = overrides.community.ledger;
        }
    }

    /// Where prompt records are stored.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history
            .path
            .clone()
            .or_else(|| data_dir().map(|d| d.join("history.json")))
    }
}

/// Builder for constructing Config with selective overrides.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_tokenizer(mut self, kind: TokenizerKind) -> Self {
        self.config.tokenizer = kind;
        self
    }

    pub fn with_min_response_tokens(mut self, floor: usize) -> Self {
        self.config.estimator.min_response_tokens = floor;
        self
    }

    pub fn with_water_ml_per_kwh(mut self, ml: f64) -> Self {
        self.config.energy.water_ml_per_kwh = ml;
        self
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.history.path = Some(path.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.community.endpoint = Some(endpoint.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Discover the config file using standard search order:
/// 1. Explicit path (if provided)
/// 2. ./ecoprompt.toml
/// 3. ~/.ecoprompt.toml
/// 4. XDG config dir
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        if p.exists() {
            return Some(p.to_path_buf());
        }
        return None;
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    if let Some(home) = dirs_home() {
        let home_config = home.join(format!(".{CONFIG_FILE_NAME}"));
        if home_config.exists() {
            return Some(home_config);
        }
    }

    if let Some(proj_dirs) = project_dirs() {
        let xdg = proj_dirs.config_dir().join(CONFIG_FILE_NAME);
        if xdg.exists() {
            return Some(xdg);
        }
    }

    None
}

/// Per-user data directory holding history, the client id and the ledger.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().to_path_buf())
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ecoprompt")
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn serde_roundtrip() {
        let config = ConfigBuilder::new()
            .with_history_path("/tmp/h.json")
            .with_endpoint("https://example.org/api/water")
            .build()
            .unwrap();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
tokenizer = "chars"

[estimator]
min_response_tokens = 40

[classifier]
extra_complex = ["quantum chromodynamics"]
"#,
        )
        .unwrap();
        assert_eq!(parsed.tokenizer, TokenizerKind::Chars);
        assert_eq!(parsed.estimator.min_response_tokens, 40);
        assert_eq!(parsed.estimator.words_per_page, 500);
        assert_eq!(parsed.energy, EnergyConfig::default());
        assert_eq!(parsed.classifier.extra_complex, vec!["quantum chromodynamics"]);
    }

    #[test]
    fn validation_rejects_zero_floor() {
        let mut config = Config::default();
        config.estimator.min_response_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_overhead_below_one() {
        let mut config = Config::default();
        config.energy.pue = 0.9;
        let err = config.validate().unwrap_err();
        assert!(err.is_user_error());
        assert!(err.to_string().contains("energy.pue"));
    }

    #[test]
    fn validation_rejects_negative_rate() {
        let mut config = Config::default();
        config.energy.water_ml_per_kwh = -1.0;
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.energy.base_kwh_per_1k_tokens = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_non_http_endpoint() {
        assert!(ConfigBuilder::new().with_endpoint("ftp://x").build().is_err());
    }

    #[test]
    fn builder_with_floor() {
        let config = ConfigBuilder::new().with_min_response_tokens(50).build().unwrap();
        assert_eq!(config.estimator.min_response_tokens, 50);
    }

    #[test]
    fn merge_overrides_sections() {
        let mut base = Config::default();
        let mut overrides = Config::default();
        overrides.energy.water_ml_per_kwh = 2000.0;
        overrides.history.path = Some(PathBuf::from("elsewhere.json"));
        base.merge(overrides);
        assert_eq!(base.energy.water_ml_per_kwh, 2000.0);
        assert_eq!(base.history_path(), Some(PathBuf::from("elsewhere.json")));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = Config::default();
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn discover_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::discover(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
