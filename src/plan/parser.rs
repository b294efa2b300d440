//! Plan parser for loading plan JSON and extracting resource descriptors.
//!
//! This module reads the output of `terraform show -json` and turns the
//! resource changes into the descriptor sets the matching engine consumes.

use crate::error::{PlanError, Result, TfmvError};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use super::resource::{PlanAction, ResourceDescriptor};
use super::schema::{ResourceChange, TerraformPlan};

/// Parser for plan JSON documents.
#[derive(Debug, Default)]
pub struct PlanParser;

/// The descriptor sets extracted from a plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanResources {
    /// Resources slated for destruction.
    pub destroyed: Vec<ResourceDescriptor>,
    /// Resources slated for creation.
    pub created: Vec<ResourceDescriptor>,
}

/// Destroyed/created counts for one resource type.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TypeCensus {
    /// The resource type.
    pub resource_type: String,
    /// Number of destroyed resources of that type.
    pub destroyed: usize,
    /// Number of created resources of that type.
    pub created: usize,
}

impl TypeCensus {
    /// Returns true if destroyed and created counts are equal.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.destroyed == self.created
    }
}

impl PlanResources {
    /// Per-type destroyed/created counts, in first-seen order across the
    /// destroyed set then the created set.
    #[must_use]
    pub fn type_census(&self) -> Vec<TypeCensus> {
        let mut census: Vec<TypeCensus> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        let mut slot = |census: &mut Vec<TypeCensus>, resource_type: &str| -> usize {
            if let Some(&slot) = slots.get(resource_type) {
                return slot;
            }
            census.push(TypeCensus {
                resource_type: resource_type.to_string(),
                destroyed: 0,
                created: 0,
            });
            let index = census.len() - 1;
            slots.insert(resource_type.to_string(), index);
            index
        };

        for descriptor in &self.destroyed {
            let index = slot(&mut census, &descriptor.resource_type);
            census[index].destroyed += 1;
        }
        for descriptor in &self.created {
            let index = slot(&mut census, &descriptor.resource_type);
            census[index].created += 1;
        }

        census
    }
}

impl PlanParser {
    /// Creates a new plan parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<TerraformPlan> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        if !path.exists() {
            return Err(TfmvError::Plan(PlanError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TfmvError::Plan(PlanError::parse(
                format!("Failed to read file: {e}"),
                Some(path.display().to_string()),
            ))
        })?;

        self.parse_json(&content, Some(path))
    }

    /// Parses a plan from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(&self, content: &str, source: Option<&Path>) -> Result<TerraformPlan> {
        debug!("Parsing plan JSON");

        let plan: TerraformPlan = serde_json::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            TfmvError::Plan(PlanError::parse(format!("JSON parse error: {e}"), location))
        })?;

        debug!(
            "Parsed plan with {} resource changes",
            plan.resource_changes.len()
        );
        Ok(plan)
    }

    /// Extracts the destroyed and created descriptor sets from a plan.
    ///
    /// Only changes whose action list is exactly `["delete"]` or exactly
    /// `["create"]` are taken; replacements are left for the planning tool
    /// to handle itself. Destroyed descriptors carry the `before` attribute
    /// values, created descriptors the `after` values.
    #[must_use]
    pub fn extract_descriptors(&self, plan: &TerraformPlan) -> PlanResources {
        let mut resources = PlanResources::default();

        for change in &plan.resource_changes {
            if change.change.is_pure_delete() {
                resources.destroyed.push(Self::descriptor_from_change(
                    change,
                    change.change.before.as_ref(),
                    PlanAction::Destroyed,
                ));
            } else if change.change.is_pure_create() {
                resources.created.push(Self::descriptor_from_change(
                    change,
                    change.change.after.as_ref(),
                    PlanAction::Created,
                ));
            }
        }

        info!(
            "Extracted {} destroyed and {} created resources",
            resources.destroyed.len(),
            resources.created.len()
        );
        resources
    }

    /// Builds a descriptor from one resource change.
    fn descriptor_from_change(
        change: &ResourceChange,
        state: Option<&Value>,
        action: PlanAction,
    ) -> ResourceDescriptor {
        let attributes = match state {
            Some(Value::Object(map)) => map.clone(),
            _ => serde_json::Map::new(),
        };

        ResourceDescriptor::new(&change.address, &change.resource_type, attributes, action)
    }
}
