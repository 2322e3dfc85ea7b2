use super::{Classification, OutputFormatter};
use anyhow::Result;
use colored::*;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Text formatter: one entry per line
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_paths(&self, paths: &[PathBuf]) -> Result<String> {
        let mut output = String::new();
        for path in paths {
            output.push_str(&format!("{}\n", path.display()));
        }
        Ok(output)
    }

    fn format_classified(&self, rows: &[Classification]) -> Result<String> {
        let mut output = String::new();
        for row in rows {
            let kind = match row.kind {
                Some(kind) => self.colorize(kind.as_str(), |s| s.cyan()),
                None => self.colorize("none", |s| s.dimmed()),
            };
            output.push_str(&format!("{}\t{kind}\n", row.path.display()));
        }
        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, value: &Value) -> Result<String> {
        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_paths(&self, paths: &[PathBuf]) -> Result<String> {
        let values: Vec<Value> = paths
            .iter()
            .map(|p| json!(p.to_string_lossy()))
            .collect();
        self.render(&Value::Array(values))
    }

    fn format_classified(&self, rows: &[Classification]) -> Result<String> {
        let values: Vec<Value> = rows
            .iter()
            .map(|row| {
                json!({
                    "path": row.path.to_string_lossy(),
                    "kind": row.kind.map(|k| k.as_str()),
                })
            })
            .collect();
        self.render(&Value::Array(values))
    }
}

/// CSV formatter with a header row
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write(headers: &[&str], records: Vec<Vec<String>>) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(headers)?;
        for record in records {
            wtr.write_record(record)?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_paths(&self, paths: &[PathBuf]) -> Result<String> {
        let records = paths
            .iter()
            .map(|p| vec![p.to_string_lossy().into_owned()])
            .collect();
        Self::write(&["path"], records)
    }

    fn format_classified(&self, rows: &[Classification]) -> Result<String> {
        let records = rows
            .iter()
            .map(|row| {
                vec![
                    row.path.to_string_lossy().into_owned(),
                    row.kind.map(|k| k.as_str()).unwrap_or_default().to_string(),
                ]
            })
            .collect();
        Self::write(&["path", "kind"], records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediafind_core::MediaKind;

    fn sample_paths() -> Vec<PathBuf> {
        vec![PathBuf::from("/media/a.wav"), PathBuf::from("/media/b, c.png")]
    }

    fn sample_rows() -> Vec<Classification> {
        vec![
            Classification {
                path: PathBuf::from("/media/a.wav"),
                kind: Some(MediaKind::Audio),
            },
            Classification {
                path: PathBuf::from("/media/readme"),
                kind: None,
            },
        ]
    }

    #[test]
    fn test_text_paths_one_per_line() {
        let output = TextFormatter::new(false).format_paths(&sample_paths()).unwrap();
        assert_eq!(output, "/media/a.wav\n/media/b, c.png\n");
    }

    #[test]
    fn test_text_empty_is_empty() {
        let output = TextFormatter::new(true).format_paths(&[]).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_text_classified_without_color() {
        let output = TextFormatter::new(false)
            .format_classified(&sample_rows())
            .unwrap();
        assert_eq!(output, "/media/a.wav\taudio\n/media/readme\tnone\n");
    }

    #[test]
    fn test_json_paths_is_an_array() {
        let output = JsonFormatter::new(false).format_paths(&sample_paths()).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec!["/media/a.wav", "/media/b, c.png"]);
    }

    #[test]
    fn test_json_classified_uses_null_for_unknown() {
        let output = JsonFormatter::new(true)
            .format_classified(&sample_rows())
            .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["kind"], "audio");
        assert!(parsed[1]["kind"].is_null());
    }

    #[test]
    fn test_csv_quotes_commas() {
        let output = CsvFormatter::new().format_paths(&sample_paths()).unwrap();
        assert_eq!(output, "path\n/media/a.wav\n\"/media/b, c.png\"\n");
    }

    #[test]
    fn test_csv_classified_has_kind_column() {
        let output = CsvFormatter::new()
            .format_classified(&sample_rows())
            .unwrap();
        assert_eq!(output, "path,kind\n/media/a.wav,audio\n/media/readme,\n");
    }
}
