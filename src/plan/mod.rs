//! Plan loading module.
//!
//! This module handles everything between the plan JSON file and the
//! matching engine:
//! - Deserializing the `terraform show -json` document
//! - Filtering resource changes down to pure deletes and pure creates
//! - Building the [`ResourceDescriptor`] sets the matcher consumes

mod parser;
mod resource;
mod schema;

pub use parser::{PlanParser, PlanResources, TypeCensus};
pub use resource::{PlanAction, ResourceDescriptor};
pub use schema::{Change, ChangeAction, ResourceChange, TerraformPlan};
