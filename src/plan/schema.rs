//! Plan file schema types.
//!
//! This module defines the structs that map to the JSON document produced by
//! `terraform show -json <planfile>`. Only the fields the matcher needs are
//! modeled; everything else in the document is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The root structure of a plan JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerraformPlan {
    /// Plan representation format version.
    #[serde(default)]
    pub format_version: Option<String>,
    /// Version of the tool that produced the plan.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// All resource changes in the plan.
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
}

/// A single resource change entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceChange {
    /// Full hierarchical address of the resource.
    pub address: String,
    /// Resource mode (`managed` or `data`).
    #[serde(default)]
    pub mode: Option<String>,
    /// Resource type token.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource name within its type.
    #[serde(default)]
    pub name: Option<String>,
    /// Provider that owns the resource.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// The planned change.
    pub change: Change,
}

/// The planned change for one resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Change {
    /// Actions to perform, in order.
    pub actions: Vec<ChangeAction>,
    /// Attribute values before the change (null on pure creates).
    #[serde(default)]
    pub before: Option<Value>,
    /// Attribute values after the change (null on pure deletes).
    #[serde(default)]
    pub after: Option<Value>,
}

/// A single action within a change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeAction {
    /// No change.
    NoOp,
    /// Create the resource.
    Create,
    /// Read a data source.
    Read,
    /// Update in place.
    Update,
    /// Destroy the resource.
    Delete,
}

impl Change {
    /// Returns true if this change is a pure delete.
    ///
    /// Replacements (`["delete", "create"]`) are not pure deletes; the
    /// planning tool already pairs those itself.
    #[must_use]
    pub fn is_pure_delete(&self) -> bool {
        self.actions == [ChangeAction::Delete]
    }

    /// Returns true if this change is a pure create.
    #[must_use]
    pub fn is_pure_create(&self) -> bool {
        self.actions == [ChangeAction::Create]
    }
}
