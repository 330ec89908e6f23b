//! Output reporters for mediation results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::{AnalysisResult, MirrorReport, RephraseResult, RewriteOption};
use crate::rewrite::StageTrace;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Anything a command can print
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Analysis(&'a AnalysisResult),
    Rephrase(&'a RephraseResult),
    Mirror(&'a MirrorReport),
    Responses(&'a [RewriteOption]),
    Explain(&'a [StageTrace]),
}

/// Render a report using an OutputFormat enum
pub fn render(report: Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}

/// Render a report as a single JSON line (for `batch`)
pub fn render_line(report: Report<'_>) -> Result<String> {
    json::render_compact(report)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::Mediator;

    pub(crate) const SAMPLE: &str = "Tu es encore en retard comme d'habitude, tu ne penses qu'à toi !!";

    /// Rephrase result for the reference message
    pub(crate) fn sample_rephrase() -> RephraseResult {
        Mediator::builtin().rephrase(SAMPLE, None)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("sarif".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
