//! Output formatting for prompt reports.
//!
//! Renders a [`ReportView`] (one analysed prompt, optionally with the
//! reasons behind each classification) as Markdown, JSON or plain text and
//! writes the result to a file or stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::aggregate::Totals;
use crate::analysis::{Explanation, PromptReport};
use crate::error::{EcoPromptError, Result};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Controls where and how output is written.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub format: Format,
    /// File path to write to; stdout when `None`.
    pub out: Option<PathBuf>,
}

/// Supported output formats.
///
/// Mirrors [`crate::cli::OutputFormat`] but decoupled from clap so that
/// library code can use it without pulling in CLI dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Json,
    Plain,
}

/// What decided each part of a report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationView {
    pub rule: String,
    pub reasoning_phrase: Option<String>,
    pub openness_phrase: Option<String>,
}

impl ExplanationView {
    pub fn new(report: &PromptReport, explanation: Explanation<'_>) -> Self {
        Self {
            rule: report.analysis.estimate_rule.label().to_string(),
            reasoning_phrase: explanation.reasoning_phrase.map(str::to_string),
            openness_phrase: explanation.openness_phrase.map(str::to_string),
        }
    }
}

/// A report ready for formatting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView<'a> {
    pub prompt: &'a str,
    #[serde(flatten)]
    pub report: &'a PromptReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<ExplanationView>,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a PromptReport) -> Self {
        Self {
            prompt: report.prompt(),
            report,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: ExplanationView) -> Self {
        self.explanation = Some(explanation);
        self
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render one report in the given format.
pub fn format_report(view: &ReportView<'_>, format: Format) -> Result<String> {
    match format {
        Format::Markdown => Ok(format_markdown(view)),
        Format::Json => to_pretty_json(view, "report"),
        Format::Plain => Ok(format_plain(view)),
    }
}

/// Render several reports followed by session totals.
pub fn format_session(views: &[ReportView<'_>], totals: &Totals, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            #[derive(Serialize)]
            struct Session<'a, 'b> {
                prompts: &'a [ReportView<'b>],
                totals: &'a Totals,
            }
            to_pretty_json(
                &Session {
                    prompts: views,
                    totals,
                },
                "session",
            )
        }
        Format::Markdown => {
            let mut out = String::new();
            for view in views {
                out.push_str(&format_markdown(view));
                out.push('\n');
            }
            out.push_str("# Session Totals\n\n");
            out.push_str(&markdown_totals(totals));
            Ok(out)
        }
        Format::Plain => {
            let mut out = String::new();
            for view in views {
                out.push_str(&format_plain(view));
                out.push('\n');
            }
            out.push_str("--- session ---\n");
            out.push_str(&plain_totals(totals));
            Ok(out)
        }
    }
}

/// Markdown: a summary table suitable for notes or issues.
fn format_markdown(view: &ReportView<'_>) -> String {
    let a = &view.report.analysis;
    let e = &view.report.energy;
    let mut out = String::new();
    out.push_str("# Prompt Energy Report\n\n");
    if !view.prompt.is_empty() {
        for line in view.prompt.lines() {
            out.push_str(&format!("> {line}\n"));
        }
        out.push('\n');
    }

    out.push_str("| Metric | Value |\n|---|---|\n");
    let rows = [
        ("Prompt tokens", a.prompt_tokens.to_string()),
        ("Estimated response tokens", a.estimated_response_tokens.to_string()),
        ("Total tokens", a.total_tokens.to_string()),
        ("Vocabulary complexity", format!("{:.2}", a.complexity)),
        (
            "Reasoning",
            format!("{} ({})", view.report.reasoning_label, a.reasoning_level.value()),
        ),
        (
            "Openness",
            format!("{} ({})", view.report.openness_label, a.openness_level.value()),
        ),
        ("Direct energy", format!("{} kWh", kwh(e.direct_kwh))),
        ("Direct water", format!("{} ml", ml(e.direct_water_ml))),
        ("Real-world energy", format!("{} kWh", kwh(e.real_world_kwh))),
        ("Real-world water", format!("{} ml", ml(e.real_world_water_ml))),
    ];
    for (metric, value) in rows {
        out.push_str(&format!("| {metric} | {value} |\n"));
    }

    if let Some(explanation) = &view.explanation {
        out.push_str("\n## Why\n\n");
        out.push_str(&format!("- length rule: {}\n", explanation.rule));
        out.push_str(&format!(
            "- reasoning phrase: {}\n",
            quoted_or_none(explanation.reasoning_phrase.as_deref())
        ));
        out.push_str(&format!(
            "- openness phrase: {}\n",
            quoted_or_none(explanation.openness_phrase.as_deref())
        ));
    }
    out
}

/// Plain text: `key: value` lines, no decoration.
fn format_plain(view: &ReportView<'_>) -> String {
    let a = &view.report.analysis;
    let e = &view.report.energy;
    let mut out = String::new();
    out.push_str(&format!("prompt tokens: {}\n", a.prompt_tokens));
    out.push_str(&format!("response tokens: {}\n", a.estimated_response_tokens));
    out.push_str(&format!("total tokens: {}\n", a.total_tokens));
    out.push_str(&format!("complexity: {:.2}\n", a.complexity));
    out.push_str(&format!("reasoning: {}\n", view.report.reasoning_label));
    out.push_str(&format!("openness: {}\n", view.report.openness_label));
    out.push_str(&format!("direct kwh: {}\n", kwh(e.direct_kwh)));
    out.push_str(&format!("direct water ml: {}\n", ml(e.direct_water_ml)));
    out.push_str(&format!("real-world kwh: {}\n", kwh(e.real_world_kwh)));
    out.push_str(&format!("real-world water ml: {}\n", ml(e.real_world_water_ml)));
    if let Some(explanation) = &view.explanation {
        out.push_str(&format!("rule: {}\n", explanation.rule));
        out.push_str(&format!(
            "reasoning phrase: {}\n",
            quoted_or_none(explanation.reasoning_phrase.as_deref())
        ));
        out.push_str(&format!(
            "openness phrase: {}\n",
            quoted_or_none(explanation.openness_phrase.as_deref())
        ));
    }
    out
}

fn markdown_totals(totals: &Totals) -> String {
    format!(
        "| Metric | Value |\n|---|---|\n\
         | Prompts | {} |\n\
         | Total tokens | {} |\n\
         | Real-world energy | {} kWh |\n\
         | Real-world water | {} ml |\n",
        totals.prompts,
        totals.total_tokens,
        kwh(totals.real_world_kwh),
        ml(totals.real_world_water_ml),
    )
}

fn plain_totals(totals: &Totals) -> String {
    format!(
        "prompts: {}\ntotal tokens: {}\nreal-world kwh: {}\nreal-world water ml: {}\n",
        totals.prompts,
        totals.total_tokens,
        kwh(totals.real_world_kwh),
        ml(totals.real_world_water_ml),
    )
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .map_err(|e| EcoPromptError::serialization(format!("encoding {what} as JSON"), e))
}

fn quoted_or_none(phrase: Option<&str>) -> String {
    phrase.map_or_else(|| "none".to_string(), |p| format!("\"{p}\""))
}

/// kWh figures are tiny; keep six decimals.
pub fn kwh(value: f64) -> String {
    format!("{value:.6}")
}

pub fn ml(value: f64) -> String {
    format!("{value:.3}")
}

// ---------------------------------------------------------------------------
// Output writing
// ---------------------------------------------------------------------------

/// Write a formatted string to the file in `options.out`, or stdout.
pub fn write_output(content: &str, options: &FormatOptions) -> Result<()> {
    match &options.out {
        Some(path) => write_to_file(content, path),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .map_err(|e| EcoPromptError::io("writing to stdout", e))
        }
    }
}

/// Write content to a file, creating parent directories if needed.
fn write_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            EcoPromptError::io(format!("creating directory '{}'", parent.display()), e)
        })?;
    }
    std::fs::write(path, content)
        .map_err(|e| EcoPromptError::io(format!("writing output to '{}'", path.display()), e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SessionAggregator;
    use crate::analysis::Analyzer;

    fn sample() -> PromptReport {
        Analyzer::default().analyze("Write a haiku about autumn")
    }

    #[test]
    fn markdown_contains_table_and_prompt() {
        let report = sample();
        let output = format_markdown(&ReportView::new(&report));
        assert!(output.contains("> Write a haiku about autumn"));
        assert!(output.contains("| Estimated response tokens | "));
        assert!(output.contains("| Real-world water | "));
        assert!(!output.contains("## Why"));
    }

    #[test]
    fn markdown_explanation_section() {
        let analyzer = Analyzer::default();
        let text = "Write a haiku about autumn";
        let report = analyzer.analyze(text);
        let explanation = ExplanationView::new(&report, analyzer.explain(text));
        let output = format_markdown(&ReportView::new(&report).with_explanation(explanation));
        assert!(output.contains("## Why"));
        assert!(output.contains("- length rule: content type"));
        assert!(output.contains("- openness phrase: \"haiku\""));
    }

    #[test]
    fn json_is_valid() {
        let report = sample();
        let output = format_report(&ReportView::new(&report), Format::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["prompt"], "Write a haiku about autumn");
        assert_eq!(
            parsed["totalTokens"].as_u64().unwrap() as usize,
            report.analysis.total_tokens
        );
        assert!(parsed.get("explanation").is_none());
    }

    #[test]
    fn plain_is_key_value_lines() {
        let report = sample();
        let output = format_plain(&ReportView::new(&report));
        assert!(output.lines().all(|l| l.contains(": ")));
        assert!(output.contains("openness: High"));
    }

    #[test]
    fn session_json_has_totals() {
        let analyzer = Analyzer::default();
        let reports = [analyzer.analyze("one"), analyzer.analyze("two")];
        let mut session = SessionAggregator::new();
        reports.iter().for_each(|r| session.record(r));
        let views: Vec<_> = reports.iter().map(ReportView::new).collect();
        let output = format_session(&views, session.totals(), Format::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["prompts"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["totals"]["prompts"], 2);
    }

    #[test]
    fn write_to_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("dir").join("report.md");
        write_to_file("hello", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}
