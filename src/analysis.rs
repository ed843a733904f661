//! The prompt pipeline: token count, classifiers, response estimate and
//! energy figures combined into one [`PromptReport`].

use serde::{Deserialize, Serialize};

use crate::classify::{
    vocabulary_complexity, OpennessClassifier, OpennessLevel, ReasoningClassifier, ReasoningLevel,
};
use crate::config::Config;
use crate::energy::{EnergyEstimate, EnergyModel};
use crate::error::Result;
use crate::estimator::{ResponseEstimator, RuleKind};
use crate::tokens::{counter_for, TokenCounter};

/// Everything the classifiers and estimator derive from one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptAnalysis {
    #[serde(skip)]
    pub raw_text: String,
    pub prompt_tokens: usize,
    pub estimated_response_tokens: usize,
    pub total_tokens: usize,
    pub complexity: f64,
    pub reasoning_level: ReasoningLevel,
    pub openness_level: OpennessLevel,
    pub estimate_rule: RuleKind,
}

/// Analysis plus energy figures, as shown to users and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptReport {
    #[serde(flatten)]
    pub analysis: PromptAnalysis,
    pub reasoning_label: String,
    pub openness_label: String,
    #[serde(flatten)]
    pub energy: EnergyEstimate,
}

impl PromptReport {
    pub fn prompt(&self) -> &str {
        &self.analysis.raw_text
    }
}

/// Runs the full pipeline. Holds no per-prompt state, so one analyzer can
/// be reused (and shared across threads) for any number of prompts.
pub struct Analyzer {
    counter: Box<dyn TokenCounter>,
    reasoning: ReasoningClassifier,
    openness: OpennessClassifier,
    estimator: ResponseEstimator,
    energy: EnergyModel,
}

impl Analyzer {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let classifiers = &config.classifier;
        Ok(Self {
            counter: counter_for(config.tokenizer, config.estimator.tokens_per_word),
            reasoning: ReasoningClassifier::with_extra(
                &classifiers.extra_complex,
                &classifiers.extra_moderate,
            ),
            openness: OpennessClassifier::with_extra(
                &classifiers.extra_high_openness,
                &classifiers.extra_medium_openness,
            ),
            estimator: ResponseEstimator::new(config.estimator.clone()),
            energy: EnergyModel::new(config.energy.clone())?,
        })
    }

    pub fn tokenizer_name(&self) -> &str {
        self.counter.name()
    }

    /// Classify and estimate a prompt without computing energy.
    pub fn classify(&self, text: &str) -> PromptAnalysis {
        let prompt_tokens = self.counter.count(text);
        let estimate = self.estimator.estimate(text, prompt_tokens);
        PromptAnalysis {
            raw_text: text.to_string(),
            prompt_tokens,
            estimated_response_tokens: estimate.tokens,
            total_tokens: prompt_tokens.saturating_add(estimate.tokens),
            complexity: vocabulary_complexity(text),
            reasoning_level: self.reasoning.classify(text),
            openness_level: self.openness.classify(text),
            estimate_rule: estimate.rule,
        }
    }

    pub fn analyze(&self, text: &str) -> PromptReport {
        let analysis = self.classify(text);
        let energy = self.energy.compute(
            analysis.total_tokens,
            analysis.complexity,
            analysis.reasoning_level,
            analysis.openness_level,
        );
        PromptReport {
            reasoning_label: analysis.reasoning_level.label().to_string(),
            openness_label: analysis.openness_level.label().to_string(),
            analysis,
            energy,
        }
    }

    /// Phrases that decided each classification, for `--explain`.
    pub fn explain(&self, text: &str) -> Explanation<'_> {
        Explanation {
            reasoning_phrase: self.reasoning.matched_phrase(text),
            openness_phrase: self.openness.matched_phrase(text),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        let config = Config::default();
        Self {
            counter: counter_for(config.tokenizer, config.estimator.tokens_per_word),
            reasoning: ReasoningClassifier::default(),
            openness: OpennessClassifier::default(),
            estimator: ResponseEstimator::new(config.estimator),
            energy: EnergyModel::default(),
        }
    }
}

/// Which keyword decided each classifier tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explanation<'a> {
    pub reasoning_phrase: Option<&'a str>,
    pub openness_phrase: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::tokens::TokenizerKind;

    #[test]
    fn paris_is_simple_low_and_short() {
        let report = Analyzer::default().analyze("Is Paris the capital of France?");
        assert_eq!(report.analysis.reasoning_level, ReasoningLevel::Simple);
        assert_eq!(report.analysis.openness_level, OpennessLevel::Low);
        assert!(report.analysis.estimated_response_tokens < 50);
        assert_eq!(report.reasoning_label, "Simple");
        assert_eq!(report.openness_label, "Low");
    }

    #[test]
    fn empty_prompt_is_total() {
        let report = Analyzer::default().analyze("");
        assert_eq!(report.analysis.prompt_tokens, 0);
        assert!(report.analysis.estimated_response_tokens >= 20);
        assert_eq!(report.analysis.estimate_rule, RuleKind::Empty);
        assert_eq!(report.analysis.complexity, 0.0);
        assert!(report.energy.base_kwh >= 0.0);
        assert!(report.energy.real_world_water_ml >= 0.0);
    }

    #[test]
    fn totals_add_up() {
        let report = Analyzer::default().analyze("Write a 500 word essay about renewable energy");
        let a = &report.analysis;
        assert_eq!(a.total_tokens, a.prompt_tokens + a.estimated_response_tokens);
        assert_eq!(a.estimate_rule, RuleKind::WordCount);
    }

    #[test]
    fn analysis_is_deterministic() {
        let analyzer = Analyzer::default();
        let text = "Compare the ethics of utilitarianism and deontology";
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }

    #[test]
    fn config_drives_pipeline() {
        let config = ConfigBuilder::new()
            .with_tokenizer(TokenizerKind::Chars)
            .with_min_response_tokens(77)
            .build()
            .unwrap();
        let analyzer = Analyzer::from_config(&config).unwrap();
        assert_eq!(analyzer.tokenizer_name(), "chars");
        let report = analyzer.analyze("");
        assert_eq!(report.analysis.estimated_response_tokens, 77);
    }

    #[test]
    fn extra_phrases_reach_classifiers() {
        let mut config = Config::default();
        config.classifier.extra_complex = vec!["sourdough".into()];
        let analyzer = Analyzer::from_config(&config).unwrap();
        let report = analyzer.analyze("tips for sourdough");
        assert_eq!(report.analysis.reasoning_level, ReasoningLevel::Complex);
        assert_eq!(analyzer.explain("tips for sourdough").reasoning_phrase, Some("sourdough"));
    }

    #[test]
    fn report_json_shape() {
        let report = Analyzer::default().analyze("Explain how vaccines work");
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "promptTokens",
            "estimatedResponseTokens",
            "totalTokens",
            "complexity",
            "reasoningLevel",
            "reasoningLabel",
            "opennessLevel",
            "opennessLabel",
            "directKWh",
            "directWaterUsageMl",
            "realWorldKWh",
            "realWorldWaterUsageMl",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["opennessLevel"], 1);
        assert!(json.get("rawText").is_none());
    }
}
