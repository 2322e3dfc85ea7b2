mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter};

use anyhow::Result;
use mediafind_core::MediaKind;
use std::path::PathBuf;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Result of classifying one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub path: PathBuf,
    pub kind: Option<MediaKind>,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a list of discovered paths
    fn format_paths(&self, paths: &[PathBuf]) -> Result<String>;

    /// Format per-file classification results
    fn format_classified(&self, rows: &[Classification]) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_string("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_string("csv").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_string("yaml").is_err());
    }

    #[test]
    fn test_as_str_round_trips() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Csv] {
            assert_eq!(OutputFormat::from_string(format.as_str()).unwrap(), format);
        }
    }
}
