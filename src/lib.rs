// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tfmv
//!
//! Match destroyed against created resources in a Terraform plan and generate
//! `state mv` commands.
//!
//! ## Overview
//!
//! When resources are renamed or moved into modules, the planning tool sees
//! unrelated destroy/create pairs and would recreate the real-world resource.
//! tfmv pairs the two sets by similarity so the operator can preserve resource
//! identity instead:
//!
//! - Load the JSON plan (`terraform show -json tfplan`)
//! - Partition destroyed and created resources by type
//! - Pair them greedily by attribute and address similarity
//! - Emit one `terraform state mv` command per matched pair
//!
//! ## Architecture
//!
//! The pipeline is pure in-memory computation between one file read and one
//! file write:
//!
//! 1. **Plan layer**: parse the plan, filter pure deletes and creates
//! 2. **Partitioner**: group by type, enforce equal per-type cardinality
//! 3. **Match engine**: score all pairs, assign greedily by descending score
//! 4. **Report**: merged pairs and unmatched residuals, rendered by the CLI
//!
//! ## Modules
//!
//! - [`plan`]: Plan JSON schema, parsing, and resource descriptors
//! - [`matcher`]: Similarity scoring, partitioning, and greedy matching
//! - [`cli`]: Command-line interface and output formatting
//!
//! ## Example
//!
//! ```no_run
//! use tfmv::matcher::{MatchEngine, TypePartitioner};
//! use tfmv::plan::PlanParser;
//!
//! # fn main() -> tfmv::error::Result<()> {
//! let parser = PlanParser::new();
//! let plan = parser.load_file("tfplan.json")?;
//! let resources = parser.extract_descriptors(&plan);
//!
//! let partitioned = TypePartitioner::new().partition(resources.destroyed, resources.created)?;
//! let result = MatchEngine::new().execute(&partitioned);
//!
//! for pair in &result.pairs {
//!     println!("{} -> {} ({:.3})", pair.destroyed, pair.created, pair.score);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod error;
pub mod matcher;
pub mod plan;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use error::{MatchError, PlanError, Result, TfmvError};
pub use matcher::{
    MatchEngine, MatchResult, MatchedPair, PartitionedPlan, ReportBuilder, SimilarityScorer,
    TypeMatches, TypePartition, TypePartitioner,
};
pub use plan::{PlanAction, PlanParser, PlanResources, ResourceDescriptor, TerraformPlan, TypeCensus};
