//! Similarity scoring between destroyed and created descriptors.
//!
//! The scorer combines two signals: how much of the planned attribute
//! configuration the two resources share, and how close their addresses are
//! as strings. Attribute agreement is weighted more heavily since it reflects
//! the actual resource configuration; address similarity catches renames on
//! resources with sparse attributes.

use serde_json::Value;
use std::collections::BTreeSet;

use crate::plan::ResourceDescriptor;

/// Weight of attribute similarity in the final score.
const ATTRIBUTE_WEIGHT: f64 = 0.7;

/// Weight of address similarity in the final score.
const ADDRESS_WEIGHT: f64 = 0.3;

/// Credit factor for near-equal string leaves, relative to exact matches.
const PARTIAL_CREDIT: f64 = 0.5;

/// String measures and their blend weights: normalized Levenshtein,
/// Jaro-Winkler, normalized Damerau-Levenshtein, Sørensen-Dice on bigrams.
const MEASURE_WEIGHTS: [f64; 4] = [0.5, 1.0, 0.5, 1.5];

/// Scorer for destroyed/created descriptor pairs.
///
/// Scores are deterministic and monotonic: raising either the attribute or
/// the address sub-score never lowers the final score. Callers must only
/// score descriptors of the same resource type.
#[derive(Debug, Default)]
pub struct SimilarityScorer;

impl SimilarityScorer {
    /// Creates a new scorer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the similarity between a destroyed and a created descriptor.
    ///
    /// Returns a value in `[0, 1]`.
    #[must_use]
    pub fn score(&self, destroyed: &ResourceDescriptor, created: &ResourceDescriptor) -> f64 {
        let attributes = Self::attribute_similarity(destroyed, created);
        let address = Self::string_similarity(&destroyed.address, &created.address);
        ATTRIBUTE_WEIGHT.mul_add(attributes, ADDRESS_WEIGHT * address)
    }

    /// Compares the flattened attribute mappings over the union of keys.
    ///
    /// Exact (deep structural) equality earns full credit per key; string
    /// leaves that differ earn partial credit scaled by string similarity.
    /// Two empty mappings are vacuously identical, so the final score falls
    /// through to address similarity.
    fn attribute_similarity(destroyed: &ResourceDescriptor, created: &ResourceDescriptor) -> f64 {
        let before = destroyed.flat_attributes();
        let after = created.flat_attributes();

        let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
        if keys.is_empty() {
            return 1.0;
        }

        let credit: f64 = keys
            .iter()
            .map(|key| match (before.get(*key), after.get(*key)) {
                (Some(&a), Some(&b)) => Self::leaf_similarity(a, b),
                _ => 0.0,
            })
            .sum();

        credit / keys.len() as f64
    }

    /// Compares two attribute leaves.
    fn leaf_similarity(before: &Value, after: &Value) -> f64 {
        if before == after {
            return 1.0;
        }
        if let (Value::String(a), Value::String(b)) = (before, after) {
            return PARTIAL_CREDIT * Self::string_similarity(a, b);
        }
        0.0
    }

    /// Computes a blended string similarity in `[0, 1]`.
    ///
    /// Weighted mean of several edit-distance and token measures; no single
    /// measure dominates, which keeps the score stable across both short
    /// index-key renames and long module moves.
    #[must_use]
    pub fn string_similarity(a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }

        let measures = [
            strsim::normalized_levenshtein(a, b),
            strsim::jaro_winkler(a, b),
            strsim::normalized_damerau_levenshtein(a, b),
            strsim::sorensen_dice(a, b),
        ];

        let total: f64 = MEASURE_WEIGHTS.iter().sum();
        let weighted: f64 = measures
            .iter()
            .zip(MEASURE_WEIGHTS.iter())
            .map(|(score, weight)| score * weight)
            .sum();

        weighted / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanAction;
    use serde_json::{Map, json};

    fn descriptor(address: &str, resource_type: &str, attrs: Value, action: PlanAction) -> ResourceDescriptor {
        let attributes = match attrs {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => panic!("expected a JSON object"),
        };
        ResourceDescriptor::new(address, resource_type, attributes, action)
    }

    #[test]
    fn test_identical_descriptors_score_one() {
        let scorer = SimilarityScorer::new();
        let destroyed = descriptor(
            "local_file.default",
            "local_file",
            json!({"content": "hello"}),
            PlanAction::Destroyed,
        );
        let created = descriptor(
            "local_file.default",
            "local_file",
            json!({"content": "hello"}),
            PlanAction::Created,
        );

        let score = scorer.score(&destroyed, &created);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_renamed_index_key_scores_high() {
        let scorer = SimilarityScorer::new();
        let destroyed = descriptor(
            r#"module.files["test1"].local_file.default"#,
            "local_file",
            json!({"content": "hello"}),
            PlanAction::Destroyed,
        );
        let created = descriptor(
            r#"module.files["test1-aaa"].local_file.default"#,
            "local_file",
            json!({"content": "hello"}),
            PlanAction::Created,
        );

        let score = scorer.score(&destroyed, &created);
        assert!(score >= 0.8, "expected >= 0.8, got {score}");
    }

    #[test]
    fn test_empty_attributes_fall_through_to_address() {
        let scorer = SimilarityScorer::new();
        let destroyed = descriptor(
            "aws_s3_bucket.logs",
            "aws_s3_bucket",
            Value::Null,
            PlanAction::Destroyed,
        );
        let near = descriptor(
            "aws_s3_bucket.logs_v2",
            "aws_s3_bucket",
            Value::Null,
            PlanAction::Created,
        );
        let far = descriptor(
            "aws_s3_bucket.completely_unrelated_name",
            "aws_s3_bucket",
            Value::Null,
            PlanAction::Created,
        );

        let near_score = scorer.score(&destroyed, &near);
        let far_score = scorer.score(&destroyed, &far);

        // Attribute similarity is vacuously 1.0 on both, so the address decides.
        assert!(near_score > far_score);
        assert!(near_score > ATTRIBUTE_WEIGHT);
    }

    #[test]
    fn test_more_attribute_overlap_never_lowers_score() {
        let scorer = SimilarityScorer::new();
        let destroyed = descriptor(
            "aws_instance.web",
            "aws_instance",
            json!({"ami": "ami-123", "instance_type": "t3.micro"}),
            PlanAction::Destroyed,
        );
        let partial = descriptor(
            "aws_instance.app",
            "aws_instance",
            json!({"ami": "ami-123", "instance_type": "t3.large"}),
            PlanAction::Created,
        );
        let full = descriptor(
            "aws_instance.app",
            "aws_instance",
            json!({"ami": "ami-123", "instance_type": "t3.micro"}),
            PlanAction::Created,
        );

        assert!(scorer.score(&destroyed, &full) >= scorer.score(&destroyed, &partial));
    }

    #[test]
    fn test_near_equal_strings_earn_partial_credit() {
        let scorer = SimilarityScorer::new();
        let destroyed = descriptor(
            "aws_s3_bucket.data",
            "aws_s3_bucket",
            json!({"bucket": "my-data-bucket"}),
            PlanAction::Destroyed,
        );
        let close = descriptor(
            "aws_s3_bucket.data",
            "aws_s3_bucket",
            json!({"bucket": "my-data-bucket-v2"}),
            PlanAction::Created,
        );
        let distant = descriptor(
            "aws_s3_bucket.data",
            "aws_s3_bucket",
            json!({"bucket": "zzzzzz"}),
            PlanAction::Created,
        );

        assert!(scorer.score(&destroyed, &close) > scorer.score(&destroyed, &distant));
    }

    #[test]
    fn test_string_similarity_bounds() {
        assert!((SimilarityScorer::string_similarity("abc", "abc") - 1.0).abs() < 1e-9);

        let score = SimilarityScorer::string_similarity("abc", "xyz");
        assert!((0.0..=1.0).contains(&score));
        assert!(score < 0.5);
    }
}
