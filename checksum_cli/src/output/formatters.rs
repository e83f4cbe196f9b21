use super::OutputFormatter;
use crate::runner::{FileDigests, VerifyOutcome, VerifyStatus};
use anyhow::Result;
use checksum_core::Algorithm;
use colored::*;
use std::collections::BTreeSet;

/// Text formatter for human-readable output
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
    fn format_digests(&self, results: &[FileDigests]) -> Result<String> {
        let blocks: Vec<String> = results
            .iter()
            .map(|result| {
                let mut output = format!("{}\n", result.file.display());
                for (algorithm, digest) in &result.digests {
                    let algo_str = self.colorize(algorithm.name(), |s| s.yellow());
                    let digest_str = self.colorize(digest, |s| s.cyan());
                    output.push_str(&format!("  {algo_str}: {digest_str}\n"));
                }
                for reference in &result.references {
                    output.push_str(&format!("  Wrote {}\n", reference.display()));
                }
                output
            })
            .collect();

        Ok(blocks.join("\n"))
    }

    fn format_verification(&self, outcomes: &[VerifyOutcome]) -> Result<String> {
        let mut output = String::new();
        for outcome in outcomes {
            let status = match &outcome.status {
                VerifyStatus::Ok => self.colorize("OK", |s| s.green()),
                VerifyStatus::Mismatch { expected, actual } => format!(
                    "{} (expected {expected}, got {actual})",
                    self.colorize("MISMATCH", |s| s.red())
                ),
                VerifyStatus::MissingReference { reference } => format!(
                    "{} ({})",
                    self.colorize("MISSING REFERENCE", |s| s.yellow()),
                    reference.display()
                ),
                VerifyStatus::Failed { message } => {
                    format!("{} ({message})", self.colorize("FAILED", |s| s.red()))
                }
            };
            output.push_str(&format!(
                "{} [{}]: {status}\n",
                outcome.file.display(),
                outcome.algorithm
            ));
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

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_digests(&self, results: &[FileDigests]) -> Result<String> {
        self.render(results)
    }

    fn format_verification(&self, outcomes: &[VerifyOutcome]) -> Result<String> {
        self.render(outcomes)
    }
}

/// CSV formatter for tabular summary output
pub struct CsvFormatter;

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    /// One column per algorithm present in any result, in a stable order
    fn algorithm_columns(results: &[FileDigests]) -> Vec<Algorithm> {
        results
            .iter()
            .flat_map(|r| r.digests.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_digests(&self, results: &[FileDigests]) -> Result<String> {
        let columns = Self::algorithm_columns(results);
        let mut wtr = csv::Writer::from_writer(vec![]);

        let mut headers = vec!["path".to_string(), "size".to_string()];
        headers.extend(columns.iter().map(|a| a.name().to_string()));
        wtr.write_record(&headers)?;

        for result in results {
            let mut record = vec![
                result.file.to_string_lossy().to_string(),
                result.size.to_string(),
            ];
            for algorithm in &columns {
                record.push(result.digests.get(algorithm).cloned().unwrap_or_default());
            }
            wtr.write_record(&record)?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }

    fn format_verification(&self, outcomes: &[VerifyOutcome]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(["path", "algorithm", "status", "expected", "actual"])?;

        for outcome in outcomes {
            let (status, expected, actual) = match &outcome.status {
                VerifyStatus::Ok => ("ok", String::new(), String::new()),
                VerifyStatus::Mismatch { expected, actual } => {
                    ("mismatch", expected.clone(), actual.clone())
                }
                VerifyStatus::MissingReference { reference } => (
                    "missing_reference",
                    reference.to_string_lossy().to_string(),
                    String::new(),
                ),
                VerifyStatus::Failed { message } => ("failed", String::new(), message.clone()),
            };
            let path = outcome.file.to_string_lossy();
            wtr.write_record([
                &*path,
                outcome.algorithm.name(),
                status,
                expected.as_str(),
                actual.as_str(),
            ])?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}
