//! tfmv CLI entrypoint.
//!
//! This is the main entrypoint for the tfmv command-line tool.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tfmv::cli::{Cli, Commands, OutputFormatter};
use tfmv::error::Result;
use tfmv::matcher::{MatchEngine, TypePartitioner};
use tfmv::plan::PlanParser;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main entry point after argument parsing.
fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output_format);

    match cli.command {
        Commands::Match {
            plan,
            output,
            min_score,
            tool,
        } => cmd_match(&plan, &output, min_score, &tool, &formatter),
        Commands::Check { plan } => cmd_check(&plan, &formatter),
        Commands::Inspect { plan } => cmd_inspect(&plan, &formatter),
    }
}

/// Match destroyed against created resources and write the move script.
fn cmd_match(
    plan_path: &Path,
    output_path: &PathBuf,
    min_score: Option<f64>,
    tool: &str,
    formatter: &OutputFormatter,
) -> Result<()> {
    let parser = PlanParser::new();
    let plan = parser.load_file(plan_path)?;
    let resources = parser.extract_descriptors(&plan);

    let partitioned =
        TypePartitioner::new().partition(resources.destroyed, resources.created)?;

    let mut engine = MatchEngine::new();
    if let Some(min) = min_score {
        engine = engine.with_min_score(min);
    }
    let result = engine.execute(&partitioned);

    let output = formatter.format_result(&result, tool);
    eprintln!("{output}");

    let script = OutputFormatter::render_script(&result, tool);
    std::fs::write(output_path, script)?;
    info!("Move commands written to: {}", output_path.display());

    eprintln!("Move commands have been written to {}", output_path.display());
    Ok(())
}

/// Validate per-type cardinality and fail on any mismatch.
fn cmd_check(plan_path: &Path, formatter: &OutputFormatter) -> Result<()> {
    let parser = PlanParser::new();
    let plan = parser.load_file(plan_path)?;
    let resources = parser.extract_descriptors(&plan);

    let census = resources.type_census();
    let output = formatter.format_check(&census);
    eprintln!("{output}");

    // Propagate the typed mismatch so the process exits non-zero.
    TypePartitioner::new().partition(resources.destroyed, resources.created)?;
    Ok(())
}

/// Show the per-type destroyed/created census.
fn cmd_inspect(plan_path: &Path, formatter: &OutputFormatter) -> Result<()> {
    let parser = PlanParser::new();
    let plan = parser.load_file(plan_path)?;
    let resources = parser.extract_descriptors(&plan);

    let census = resources.type_census();
    let output = formatter.format_census(&census);
    eprintln!("{output}");

    Ok(())
}
