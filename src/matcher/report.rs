//! Match result aggregation.
//!
//! The engine produces one [`TypeMatches`] per partition; the report builder
//! concatenates them, preserving partition order, into the single
//! [`MatchResult`] handed to the output layer.

use serde::Serialize;

use crate::plan::ResourceDescriptor;

/// A matched destroyed/created pair with its similarity score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchedPair {
    /// The descriptor slated for destruction.
    pub destroyed: ResourceDescriptor,
    /// The descriptor slated for creation.
    pub created: ResourceDescriptor,
    /// Similarity score in `[0, 1]`.
    pub score: f64,
}

/// Match outcome for a single type partition.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMatches {
    /// The resource type of the partition.
    pub resource_type: String,
    /// Accepted pairs, in the order the engine resolved them.
    pub pairs: Vec<MatchedPair>,
    /// Destroyed descriptors with no assigned counterpart.
    pub unmatched_destroyed: Vec<ResourceDescriptor>,
    /// Created descriptors with no assigned counterpart.
    pub unmatched_created: Vec<ResourceDescriptor>,
}

/// Match outcome for a whole plan, spanning all types.
///
/// Every descriptor that entered matching appears exactly once: in a pair or
/// in the corresponding unmatched list.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MatchResult {
    /// Matched pairs, per-type order preserved, types in partition order.
    pub pairs: Vec<MatchedPair>,
    /// Destroyed descriptors with no assigned counterpart.
    pub unmatched_destroyed: Vec<ResourceDescriptor>,
    /// Created descriptors with no assigned counterpart.
    pub unmatched_created: Vec<ResourceDescriptor>,
}

/// Builder merging per-type outcomes into one [`MatchResult`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    result: MatchResult,
}

impl MatchResult {
    /// Number of matched pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Total number of descriptors accounted for.
    #[must_use]
    pub fn descriptor_count(&self) -> usize {
        self.pairs.len() * 2 + self.unmatched_destroyed.len() + self.unmatched_created.len()
    }

    /// Returns true if any descriptor ended up unmatched.
    #[must_use]
    pub fn has_unmatched(&self) -> bool {
        !self.unmatched_destroyed.is_empty() || !self.unmatched_created.is_empty()
    }

    /// Returns true if nothing was matched and nothing was left over.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && !self.has_unmatched()
    }
}

impl ReportBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one partition's outcome, preserving its internal order.
    pub fn add(&mut self, matches: TypeMatches) {
        self.result.pairs.extend(matches.pairs);
        self.result
            .unmatched_destroyed
            .extend(matches.unmatched_destroyed);
        self.result
            .unmatched_created
            .extend(matches.unmatched_created);
    }

    /// Finishes the report.
    #[must_use]
    pub fn build(self) -> MatchResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanAction;
    use serde_json::Map;

    fn descriptor(address: &str, resource_type: &str, action: PlanAction) -> ResourceDescriptor {
        ResourceDescriptor::new(address, resource_type, Map::new(), action)
    }

    fn pair(destroyed: &str, created: &str, resource_type: &str, score: f64) -> MatchedPair {
        MatchedPair {
            destroyed: descriptor(destroyed, resource_type, PlanAction::Destroyed),
            created: descriptor(created, resource_type, PlanAction::Created),
            score,
        }
    }

    #[test]
    fn test_builder_preserves_partition_order() {
        let mut builder = ReportBuilder::new();
        builder.add(TypeMatches {
            resource_type: String::from("aws_s3_bucket"),
            pairs: vec![pair("aws_s3_bucket.a", "aws_s3_bucket.b", "aws_s3_bucket", 0.9)],
            unmatched_destroyed: vec![],
            unmatched_created: vec![],
        });
        builder.add(TypeMatches {
            resource_type: String::from("local_file"),
            pairs: vec![pair("local_file.a", "local_file.b", "local_file", 0.7)],
            unmatched_destroyed: vec![descriptor(
                "local_file.orphan",
                "local_file",
                PlanAction::Destroyed,
            )],
            unmatched_created: vec![descriptor(
                "local_file.fresh",
                "local_file",
                PlanAction::Created,
            )],
        });

        let result = builder.build();
        assert_eq!(result.pair_count(), 2);
        assert_eq!(result.pairs[0].destroyed.resource_type, "aws_s3_bucket");
        assert_eq!(result.pairs[1].destroyed.resource_type, "local_file");
        assert!(result.has_unmatched());
        assert_eq!(result.descriptor_count(), 6);
    }

    #[test]
    fn test_empty_result() {
        let result = ReportBuilder::new().build();
        assert!(result.is_empty());
        assert_eq!(result.descriptor_count(), 0);
    }
}
