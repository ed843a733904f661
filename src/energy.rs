//! Energy and water model.
//!
//! Converts a token count plus classifier signals into kWh and millilitres
//! of cooling water. Modifiers add up into one multiplier over the base
//! rate; real-world figures then apply five overhead factors (PUE, idle
//! load, network, amortised training, production environment).

use serde::{Deserialize, Serialize};

use crate::classify::{OpennessLevel, ReasoningLevel};
use crate::config::EnergyConfig;
use crate::error::{EcoPromptError, Result};

/// Energy and water figures for one prompt and its estimated response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyEstimate {
    #[serde(rename = "baseKWh")]
    pub base_kwh: f64,
    #[serde(rename = "directKWh")]
    pub direct_kwh: f64,
    #[serde(rename = "realWorldKWh")]
    pub real_world_kwh: f64,
    #[serde(rename = "directWaterUsageMl")]
    pub direct_water_ml: f64,
    #[serde(rename = "realWorldWaterUsageMl")]
    pub real_world_water_ml: f64,
    /// `1 + sum of modifiers` applied to the base figure.
    pub total_modifier: f64,
}

/// Deterministic energy model over an [`EnergyConfig`].
#[derive(Debug, Clone, Default)]
pub struct EnergyModel {
    config: EnergyConfig,
}

impl EnergyModel {
    pub fn new(config: EnergyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EnergyConfig {
        &self.config
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    /// Product of the five real-world overhead factors.
    pub fn overhead_product(&self) -> f64 {
        self.config
            .overhead_factors()
            .iter()
            .map(|(_, factor)| factor)
            .product()
    }

    /// Sum of the additive modifiers for the given signals.
    pub fn modifier_sum(
        &self,
        complexity: f64,
        reasoning: ReasoningLevel,
        openness: OpennessLevel,
    ) -> f64 {
        let c = &self.config;
        let complexity = clamp_unit(complexity);
        let reasoning_modifier = match reasoning {
            ReasoningLevel::Simple => c.reasoning_simple,
            ReasoningLevel::Moderate => c.reasoning_moderate,
            ReasoningLevel::Complex => c.reasoning_complex,
        };
        let openness_modifier = match openness {
            OpennessLevel::Low => c.openness_low,
            OpennessLevel::Medium => c.openness_medium,
            OpennessLevel::High => c.openness_high,
        };

        let complex_reasoning = reasoning == ReasoningLevel::Complex;
        let complex_vocabulary = complexity >= c.complexity_threshold;
        let inference_overhead = match (complex_reasoning, complex_vocabulary) {
            (true, true) => c.inference_overhead_both_high,
            (true, false) | (false, true) => c.inference_overhead_either_high,
            (false, false) => c.inference_overhead_neither,
        };

        reasoning_modifier
            + openness_modifier
            + complexity * c.complexity_coefficient
            + inference_overhead
    }

    /// Compute figures for `total_tokens`. Total over all inputs; a
    /// non-finite complexity is treated as 0.
    pub fn compute(
        &self,
        total_tokens: usize,
        complexity: f64,
        reasoning: ReasoningLevel,
        openness: OpennessLevel,
    ) -> EnergyEstimate {
        let c = &self.config;
        let base_kwh = total_tokens as f64 / 1000.0 * c.base_kwh_per_1k_tokens;
        let total_modifier = 1.0 + self.modifier_sum(complexity, reasoning, openness);
        let direct_kwh = base_kwh * total_modifier;
        let real_world_kwh = direct_kwh * self.overhead_product();

        EnergyEstimate {
            base_kwh,
            direct_kwh,
            real_world_kwh,
            direct_water_ml: direct_kwh * c.water_ml_per_kwh,
            real_world_water_ml: real_world_kwh * c.water_ml_per_kwh,
            total_modifier,
        }
    }

    /// Like [`compute`](Self::compute), but rejects inputs that cannot come
    /// from a real prompt: negative token counts and non-finite complexity.
    pub fn compute_checked(
        &self,
        total_tokens: i64,
        complexity: f64,
        reasoning: ReasoningLevel,
        openness: OpennessLevel,
    ) -> Result<EnergyEstimate> {
        if total_tokens < 0 {
            return Err(EcoPromptError::validation(
                "tokens",
                format!("must not be negative (got {total_tokens})"),
            ));
        }
        if !complexity.is_finite() {
            return Err(EcoPromptError::validation(
                "complexity",
                "must be a finite number",
            ));
        }
        if !(0.0..=1.0).contains(&complexity) {
            return Err(EcoPromptError::validation(
                "complexity",
                format!("must be within [0, 1] (got {complexity})"),
            ));
        }
        let tokens = usize::try_from(total_tokens).unwrap_or(usize::MAX);
        Ok(self.compute(tokens, complexity, reasoning, openness))
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
