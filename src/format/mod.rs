//! Scorecard output formats (C8 continued): text, JSON, HTML.

pub mod html;
pub mod json;
pub mod text;

use crate::model::AuditScorecard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format `{other}` (expected text, json, or html)")),
        }
    }
}

pub fn render(scorecard: &AuditScorecard, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => text::render(scorecard),
        OutputFormat::Json => json::render(scorecard),
        OutputFormat::Html => html::render(scorecard),
    }
}
