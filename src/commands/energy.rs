//! Handler for the `ecoprompt energy` command: runs the energy model on a
//! raw token count without analysing any text.

use crate::cli::{OpennessArg, OutputFormat, ReasoningArg};
use crate::config::Config;
use crate::energy::{EnergyEstimate, EnergyModel};
use crate::error::{EcoPromptError, Result};
use crate::output::{kwh, ml};
use crate::utils;

#[derive(Debug)]
pub struct EnergyCommandOptions {
    pub tokens: i64,
    pub complexity: f64,
    pub reasoning: ReasoningArg,
    pub openness: OpennessArg,
    pub format: OutputFormat,
    pub config: Config,
}

pub fn run(options: EnergyCommandOptions) -> Result<()> {
    let rendered = render(&options)?;
    print!("{rendered}");
    Ok(())
}

fn render(options: &EnergyCommandOptions) -> Result<String> {
    let model = EnergyModel::new(options.config.energy.clone())?;
    let estimate = model.compute_checked(
        options.tokens,
        options.complexity,
        utils::cli_reasoning(options.reasoning),
        utils::cli_openness(options.openness),
    )?;
    format_estimate(&estimate, options.format)
}

fn format_estimate(e: &EnergyEstimate, format: OutputFormat) -> Result<String> {
    let rows = [
        ("base kwh", kwh(e.base_kwh)),
        ("modifier", format!("{:.3}", e.total_modifier)),
        ("direct kwh", kwh(e.direct_kwh)),
        ("direct water ml", ml(e.direct_water_ml)),
        ("real-world kwh", kwh(e.real_world_kwh)),
        ("real-world water ml", ml(e.real_world_water_ml)),
    ];
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(e)
                .map_err(|err| EcoPromptError::serialization("encoding energy estimate", err))?;
            json.push('\n');
            json
        }
        OutputFormat::Markdown => {
            let mut out = String::from("| Metric | Value |\n|---|---|\n");
            for (name, value) in rows {
                out.push_str(&format!("| {name} | {value} |\n"));
            }
            out
        }
        OutputFormat::Plain => rows
            .iter()
            .map(|(name, value)| format!("{name}: {value}\n"))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(tokens: i64) -> EnergyCommandOptions {
        EnergyCommandOptions {
            tokens,
            complexity: 0.5,
            reasoning: ReasoningArg::Moderate,
            openness: OpennessArg::Medium,
            format: OutputFormat::Json,
            config: Config::default(),
        }
    }

    #[test]
    fn json_output_parses() {
        let out = render(&options(1000)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed["realWorldKWh"].as_f64().unwrap() > parsed["directKWh"].as_f64().unwrap());
    }

    #[test]
    fn negative_tokens_are_rejected() {
        let err = render(&options(-1)).unwrap_err();
        assert!(err.to_string().contains("tokens"));
    }

    #[test]
    fn plain_output_lists_figures() {
        let mut opts = options(500);
        opts.format = OutputFormat::Plain;
        let out = render(&opts).unwrap();
        assert!(out.contains("real-world water ml: "));
        assert_eq!(out.lines().count(), 6);
    }
}
