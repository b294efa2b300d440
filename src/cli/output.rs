//! Output formatting for CLI commands.
//!
//! This module renders match reports, type censuses, and the generated
//! move-command script in text or JSON form.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::matcher::{MatchResult, MatchedPair};
use crate::plan::TypeCensus;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Matched pair row for table display.
#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Destroyed")]
    destroyed: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Score")]
    score: String,
}

/// Type census row for table display.
#[derive(Tabled)]
struct CensusRow {
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Destroyed")]
    destroyed: usize,
    #[tabled(rename = "Created")]
    created: usize,
}

/// JSON representation of a match report.
#[derive(Serialize)]
struct ReportJson {
    generated_at: DateTime<Utc>,
    pair_count: usize,
    pairs: Vec<PairJson>,
    unmatched_destroyed: Vec<String>,
    unmatched_created: Vec<String>,
}

/// JSON representation of one matched pair.
#[derive(Serialize)]
struct PairJson {
    destroyed: String,
    created: String,
    score: f64,
    command: String,
}

/// JSON representation of a cardinality check.
#[derive(Serialize)]
struct CheckJson {
    balanced: bool,
    types: Vec<TypeCensus>,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a match report for display.
    #[must_use]
    pub fn format_result(&self, result: &MatchResult, tool: &str) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&report_json(result, tool)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_result_text(result),
        }
    }

    /// Formats a match report as text.
    fn format_result_text(result: &MatchResult) -> String {
        if result.is_empty() {
            return format!(
                "{} No destroyed or created resources to match.\n",
                "✓".green()
            );
        }

        let mut output = String::new();
        let _ = write!(output, "\n🔗 Match Report\n\n");

        let rows: Vec<MatchRow> = result
            .pairs
            .iter()
            .map(|pair| MatchRow {
                destroyed: pair.destroyed.address.clone(),
                created: pair.created.address.clone(),
                score: format!("{:.3}", pair.score),
            })
            .collect();

        if !rows.is_empty() {
            let table = Table::new(rows).to_string();
            output.push_str(&table);
            output.push('\n');
        }

        let _ = write!(
            output,
            "\nMatched {} pair(s), {} destroyed and {} created left unmatched\n",
            result.pair_count().to_string().green(),
            result.unmatched_destroyed.len().to_string().red(),
            result.unmatched_created.len().to_string().red()
        );

        if !result.unmatched_destroyed.is_empty() {
            let _ = write!(output, "\n{}\n", "Unmatched destroyed resources:".red());
            for descriptor in &result.unmatched_destroyed {
                let _ = writeln!(output, "  - {descriptor}");
            }
        }

        if !result.unmatched_created.is_empty() {
            let _ = write!(output, "\n{}\n", "Unmatched created resources:".red());
            for descriptor in &result.unmatched_created {
                let _ = writeln!(output, "  - {descriptor}");
            }
        }

        output
    }

    /// Formats a per-type census for display.
    #[must_use]
    pub fn format_census(&self, census: &[TypeCensus]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(census).unwrap_or_default(),
            OutputFormat::Text => Self::census_table(census),
        }
    }

    /// Formats a cardinality check verdict for display.
    #[must_use]
    pub fn format_check(&self, census: &[TypeCensus]) -> String {
        let balanced = census.iter().all(TypeCensus::is_balanced);

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&CheckJson {
                balanced,
                types: census.to_vec(),
            })
            .unwrap_or_default(),
            OutputFormat::Text => {
                let mut output = Self::census_table(census);
                if balanced {
                    let _ = write!(
                        output,
                        "\n{} All resource types are balanced.\n",
                        "✓".green()
                    );
                } else {
                    let _ = write!(output, "\n{} Unbalanced resource types:\n", "✗".red());
                    for entry in census.iter().filter(|c| !c.is_balanced()) {
                        let _ = writeln!(
                            output,
                            "  - {}: {} destroyed vs {} created",
                            entry.resource_type, entry.destroyed, entry.created
                        );
                    }
                }
                output
            }
        }
    }

    /// Renders the census table.
    fn census_table(census: &[TypeCensus]) -> String {
        if census.is_empty() {
            return format!("{} Plan contains no pure deletes or creates.\n", "✓".green());
        }

        let rows: Vec<CensusRow> = census
            .iter()
            .map(|entry| CensusRow {
                resource_type: entry.resource_type.clone(),
                destroyed: entry.destroyed,
                created: entry.created,
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        output.push('\n');
        output
    }

    /// Renders the move-command script for a match report.
    ///
    /// One command per matched pair, in report order. Addresses are
    /// single-quoted; index keys inside them use double quotes.
    #[must_use]
    pub fn render_script(result: &MatchResult, tool: &str) -> String {
        let mut script = String::from("#!/bin/sh\n");
        let _ = writeln!(
            script,
            "# State move commands generated by tfmv at {}",
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
        );
        let _ = writeln!(script, "# Review before running; moves are applied one by one.");

        for pair in &result.pairs {
            script.push_str(&move_command(pair, tool));
            script.push('\n');
        }

        script
    }
}

/// Builds the JSON report wrapper.
fn report_json(result: &MatchResult, tool: &str) -> ReportJson {
    ReportJson {
        generated_at: Utc::now(),
        pair_count: result.pair_count(),
        pairs: result
            .pairs
            .iter()
            .map(|pair| PairJson {
                destroyed: pair.destroyed.address.clone(),
                created: pair.created.address.clone(),
                score: pair.score,
                command: move_command(pair, tool),
            })
            .collect(),
        unmatched_destroyed: result
            .unmatched_destroyed
            .iter()
            .map(|d| d.address.clone())
            .collect(),
        unmatched_created: result
            .unmatched_created
            .iter()
            .map(|d| d.address.clone())
            .collect(),
    }
}

/// Renders the state move command for one matched pair.
fn move_command(pair: &MatchedPair, tool: &str) -> String {
    format!(
        "{tool} state mv '{}' '{}'",
        pair.destroyed.address, pair.created.address
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PlanAction, ResourceDescriptor};
    use serde_json::Map;

    fn sample_result() -> MatchResult {
        MatchResult {
            pairs: vec![MatchedPair {
                destroyed: ResourceDescriptor::new(
                    r#"module.files["test1"].local_file.default"#,
                    "local_file",
                    Map::new(),
                    PlanAction::Destroyed,
                ),
                created: ResourceDescriptor::new(
                    r#"module.files["test1-aaa"].local_file.default"#,
                    "local_file",
                    Map::new(),
                    PlanAction::Created,
                ),
                score: 0.97,
            }],
            unmatched_destroyed: vec![],
            unmatched_created: vec![ResourceDescriptor::new(
                "local_file.extra",
                "local_file",
                Map::new(),
                PlanAction::Created,
            )],
        }
    }

    #[test]
    fn test_script_quotes_addresses() {
        let script = OutputFormatter::render_script(&sample_result(), "terraform");

        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(
            r#"terraform state mv 'module.files["test1"].local_file.default' 'module.files["test1-aaa"].local_file.default'"#
        ));
    }

    #[test]
    fn test_script_respects_tool_name() {
        let script = OutputFormatter::render_script(&sample_result(), "tofu");
        assert!(script.contains("tofu state mv"));
        assert!(!script.contains("terraform state mv"));
    }

    #[test]
    fn test_json_report_lists_unmatched() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let json = formatter.format_result(&sample_result(), "terraform");

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pair_count"], 1);
        assert_eq!(value["unmatched_created"][0], "local_file.extra");
    }

    #[test]
    fn test_text_report_mentions_counts() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_result(&sample_result(), "terraform");

        assert!(text.contains("Match Report"));
        assert!(text.contains("local_file.extra"));
    }

    #[test]
    fn test_check_reports_unbalanced_types() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let census = vec![
            TypeCensus {
                resource_type: String::from("local_file"),
                destroyed: 1,
                created: 1,
            },
            TypeCensus {
                resource_type: String::from("aws_s3_bucket"),
                destroyed: 2,
                created: 1,
            },
        ];

        let text = formatter.format_check(&census);
        assert!(text.contains("aws_s3_bucket: 2 destroyed vs 1 created"));
    }

    #[test]
    fn test_check_json_verdict() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let census = vec![TypeCensus {
            resource_type: String::from("local_file"),
            destroyed: 1,
            created: 1,
        }];

        let value: serde_json::Value =
            serde_json::from_str(&formatter.format_check(&census)).unwrap();
        assert_eq!(value["balanced"], true);
    }
}
