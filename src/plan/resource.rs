//! Resource descriptors extracted from a plan.
//!
//! A [`ResourceDescriptor`] is the unit the matching engine reasons about:
//! the address and type of a resource slated for destruction or creation,
//! together with its planned attribute values. Descriptors are read-only
//! once constructed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Which side of the plan a descriptor belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanAction {
    /// The resource is slated for destruction.
    Destroyed,
    /// The resource is slated for creation.
    Created,
}

/// One resource instance appearing in the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceDescriptor {
    /// Full hierarchical address as the planning tool reports it
    /// (e.g. `module.files["test1"].local_file.default`).
    pub address: String,
    /// Resource type token (e.g. `local_file`, `aws_s3_bucket`).
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Planned attribute values. `before` for destroyed resources,
    /// `after` for created ones.
    pub attributes: Map<String, Value>,
    /// Which action set this descriptor belongs to.
    pub action: PlanAction,
}

impl ResourceDescriptor {
    /// Creates a new descriptor.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        resource_type: impl Into<String>,
        attributes: Map<String, Value>,
        action: PlanAction,
    ) -> Self {
        Self {
            address: address.into(),
            resource_type: resource_type.into(),
            attributes,
            action,
        }
    }

    /// Returns a flattened view of the attributes.
    ///
    /// Nested mappings are recursed into with dot-joined keys
    /// (`backup.policy.retention`); scalars and sequences stay as leaf
    /// values. An empty nested mapping contributes no keys.
    #[must_use]
    pub fn flat_attributes(&self) -> BTreeMap<String, &Value> {
        let mut flat = BTreeMap::new();
        for (key, value) in &self.attributes {
            flatten_value(key.clone(), value, &mut flat);
        }
        flat
    }
}

impl std::fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address)
    }
}

impl std::fmt::Display for PlanAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Destroyed => "destroyed",
            Self::Created => "created",
        };
        write!(f, "{s}")
    }
}

/// Flattens one attribute value into `out` under `key`.
fn flatten_value<'a>(key: String, value: &'a Value, out: &mut BTreeMap<String, &'a Value>) {
    if let Value::Object(map) = value {
        for (child_key, child) in map {
            flatten_value(format!("{key}.{child_key}"), child, out);
        }
    } else {
        out.insert(key, value);
    }
}
