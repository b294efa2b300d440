//! Type partitioning and cardinality validation.
//!
//! Matching never crosses resource types, so the descriptor sets are first
//! grouped into per-type partitions. Partitioning also enforces the
//! structural precondition for a run: every type must have equally many
//! destroyed and created resources, otherwise the whole run is aborted
//! before any matching starts.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{MatchError, Result};
use crate::plan::ResourceDescriptor;

/// Partitioner grouping descriptors by resource type.
#[derive(Debug, Default)]
pub struct TypePartitioner;

/// The destroyed and created descriptors of one resource type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePartition {
    /// The resource type shared by all descriptors in this partition.
    pub resource_type: String,
    /// Destroyed descriptors, in input order.
    pub destroyed: Vec<ResourceDescriptor>,
    /// Created descriptors, in input order.
    pub created: Vec<ResourceDescriptor>,
}

/// All partitions of a plan, in first-seen type order.
///
/// Types are ordered by their first appearance scanning the destroyed set,
/// then the created set. This order is what makes report output reproducible
/// across runs on identical input.
#[derive(Debug, Default, PartialEq)]
pub struct PartitionedPlan {
    /// Per-type partitions.
    pub partitions: Vec<TypePartition>,
}

impl TypePartition {
    fn empty(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            destroyed: Vec::new(),
            created: Vec::new(),
        }
    }
}

impl PartitionedPlan {
    /// Total number of descriptors across all partitions.
    #[must_use]
    pub fn descriptor_count(&self) -> usize {
        self.partitions
            .iter()
            .map(|p| p.destroyed.len() + p.created.len())
            .sum()
    }

    /// Returns true if the plan has no destroyed or created resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

impl TypePartitioner {
    /// Creates a new partitioner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Groups descriptors by resource type and validates cardinality.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::CardinalityMismatch`] for the first type (in
    /// first-seen order) whose destroyed and created counts differ. No
    /// partitions are produced in that case; partial matching under
    /// miscounted sets is never attempted.
    pub fn partition(
        &self,
        destroyed: Vec<ResourceDescriptor>,
        created: Vec<ResourceDescriptor>,
    ) -> Result<PartitionedPlan> {
        let mut partitions: Vec<TypePartition> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for descriptor in destroyed {
            let slot = Self::slot(&mut partitions, &mut slots, &descriptor.resource_type);
            partitions[slot].destroyed.push(descriptor);
        }
        for descriptor in created {
            let slot = Self::slot(&mut partitions, &mut slots, &descriptor.resource_type);
            partitions[slot].created.push(descriptor);
        }

        for partition in &partitions {
            if partition.destroyed.len() != partition.created.len() {
                return Err(MatchError::CardinalityMismatch {
                    resource_type: partition.resource_type.clone(),
                    destroyed: partition.destroyed.len(),
                    created: partition.created.len(),
                }
                .into());
            }
            debug!(
                "Partition {}: {} destroyed, {} created",
                partition.resource_type,
                partition.destroyed.len(),
                partition.created.len()
            );
        }

        Ok(PartitionedPlan { partitions })
    }

    /// Returns the partition index for a type, creating it on first sight.
    fn slot(
        partitions: &mut Vec<TypePartition>,
        slots: &mut HashMap<String, usize>,
        resource_type: &str,
    ) -> usize {
        if let Some(&slot) = slots.get(resource_type) {
            return slot;
        }
        partitions.push(TypePartition::empty(resource_type));
        let slot = partitions.len() - 1;
        slots.insert(resource_type.to_string(), slot);
        slot
    }
}
