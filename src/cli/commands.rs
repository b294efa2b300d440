//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tfmv - Match destroyed against created plan resources and generate
/// state move commands.
#[derive(Parser, Debug)]
#[command(name = "tfmv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output_format: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match destroyed against created resources and write move commands.
    Match {
        /// Path to the plan JSON file (`terraform show -json` output).
        #[arg(short, long, env = "TFMV_PLAN")]
        plan: PathBuf,

        /// File to write the move commands to.
        #[arg(short, long, default_value = "terraform_move_commands.sh")]
        output: PathBuf,

        /// Minimum similarity score for a pair to be accepted.
        ///
        /// Without a threshold, every resource is paired as long as a
        /// counterpart remains; the reported score is the operator's
        /// confidence signal.
        #[arg(long)]
        min_score: Option<f64>,

        /// Tool name used in the generated commands (e.g. terraform, tofu).
        #[arg(long, default_value = "terraform")]
        tool: String,
    },

    /// Validate per-type destroyed/created cardinality without matching.
    Check {
        /// Path to the plan JSON file.
        #[arg(short, long, env = "TFMV_PLAN")]
        plan: PathBuf,
    },

    /// Show the per-type destroyed/created census of a plan.
    Inspect {
        /// Path to the plan JSON file.
        #[arg(short, long, env = "TFMV_PLAN")]
        plan: PathBuf,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_defaults() {
        let cli = Cli::try_parse_from(["tfmv", "match", "--plan", "tfplan.json"]).unwrap();

        match cli.command {
            Commands::Match {
                plan,
                output,
                min_score,
                tool,
            } => {
                assert_eq!(plan, PathBuf::from("tfplan.json"));
                assert_eq!(output, PathBuf::from("terraform_move_commands.sh"));
                assert!(min_score.is_none());
                assert_eq!(tool, "terraform");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_plan_argument_is_required() {
        let result = Cli::try_parse_from(["tfmv", "match"]);
        assert!(result.is_err());
    }
}
