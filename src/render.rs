//! Report rendering

use crate::error::{InspectorError, Result};
use crate::inspector::Report;
use std::fmt::Write as _;
use std::str::FromStr;

/// Output format for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Sectioned plain text, one range per line
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = InspectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(InspectorError::Config(format!(
                "Invalid output format '{}'. Valid options: text, json",
                s
            ))),
        }
    }
}

/// Render a report in the requested format
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();

    section(&mut out, "declared ranges", report.declared.iter());
    section(&mut out, "parsed ranges", report.used.iter());
    section(&mut out, "available ranges", report.free.iter());

    out
}

fn section<T: std::fmt::Display>(out: &mut String, title: &str, items: impl Iterator<Item = T>) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "-- {}", title);
    for item in items {
        let _ = writeln!(out, "{}", item);
    }
}
