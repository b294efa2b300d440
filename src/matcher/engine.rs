//! Greedy matching engine.
//!
//! For each type partition the engine scores the full destroyed×created
//! cross product, sorts candidates by descending score, and accepts pairs
//! greedily while both members are still unassigned. Greedy-by-descending-
//! score is a deliberate simplification over optimal bipartite assignment:
//! O(n² log n) per type, and the operator can follow the reasoning
//! ("highest-confidence pairs win first"). Swapping in a maximum-weight
//! algorithm would only touch this module.

use tracing::debug;

use crate::plan::ResourceDescriptor;

use super::partition::{PartitionedPlan, TypePartition};
use super::report::{MatchResult, MatchedPair, ReportBuilder, TypeMatches};
use super::score::SimilarityScorer;

/// Engine pairing destroyed with created descriptors by similarity.
#[derive(Debug, Default)]
pub struct MatchEngine {
    /// Pairwise scorer.
    scorer: SimilarityScorer,
    /// Optional minimum score for a pair to be accepted.
    min_score: Option<f64>,
}

/// A scored destroyed/created index pair within one partition.
#[derive(Debug, Clone, Copy)]
struct MatchCandidate {
    destroyed: usize,
    created: usize,
    score: f64,
}

impl MatchEngine {
    /// Creates a new engine with no minimum-score threshold.
    ///
    /// Without a threshold even a low-confidence pair is proposed when both
    /// sides remain unassigned; the report surfaces the score so the
    /// operator can judge.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scorer: SimilarityScorer::new(),
            min_score: None,
        }
    }

    /// Sets a minimum score below which candidates are never accepted.
    #[must_use]
    pub const fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Matches every partition and merges the outcomes into one result.
    #[must_use]
    pub fn execute(&self, plan: &PartitionedPlan) -> MatchResult {
        let mut builder = ReportBuilder::new();
        for partition in &plan.partitions {
            builder.add(self.match_partition(partition));
        }
        builder.build()
    }

    /// Matches the descriptors of a single type partition.
    #[must_use]
    pub fn match_partition(&self, partition: &TypePartition) -> TypeMatches {
        let candidates = self.score_candidates(partition);
        debug!(
            "Type {}: {} candidate pairs",
            partition.resource_type,
            candidates.len()
        );

        let mut destroyed_taken = vec![false; partition.destroyed.len()];
        let mut created_taken = vec![false; partition.created.len()];
        let mut pairs = Vec::new();

        for candidate in candidates {
            if destroyed_taken[candidate.destroyed] || created_taken[candidate.created] {
                continue;
            }
            destroyed_taken[candidate.destroyed] = true;
            created_taken[candidate.created] = true;

            let destroyed = &partition.destroyed[candidate.destroyed];
            let created = &partition.created[candidate.created];
            debug!(
                "Matched {} -> {} (score {:.3})",
                destroyed.address, created.address, candidate.score
            );
            pairs.push(MatchedPair {
                destroyed: destroyed.clone(),
                created: created.clone(),
                score: candidate.score,
            });
        }

        let unmatched_destroyed = leftovers(&partition.destroyed, &destroyed_taken);
        let unmatched_created = leftovers(&partition.created, &created_taken);

        TypeMatches {
            resource_type: partition.resource_type.clone(),
            pairs,
            unmatched_destroyed,
            unmatched_created,
        }
    }

    /// Scores the full cross product and sorts candidates deterministically:
    /// by score descending, ties broken by destroyed address then created
    /// address lexical order.
    fn score_candidates(&self, partition: &TypePartition) -> Vec<MatchCandidate> {
        let mut candidates =
            Vec::with_capacity(partition.destroyed.len() * partition.created.len());

        for (i, destroyed) in partition.destroyed.iter().enumerate() {
            for (j, created) in partition.created.iter().enumerate() {
                let score = self.scorer.score(destroyed, created);
                if self.min_score.is_some_and(|min| score < min) {
                    continue;
                }
                candidates.push(MatchCandidate {
                    destroyed: i,
                    created: j,
                    score,
                });
            }
        }

        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| {
                    partition.destroyed[a.destroyed]
                        .address
                        .cmp(&partition.destroyed[b.destroyed].address)
                })
                .then_with(|| {
                    partition.created[a.created]
                        .address
                        .cmp(&partition.created[b.created].address)
                })
        });

        candidates
    }
}

/// Collects the descriptors whose slot was never taken.
fn leftovers(descriptors: &[ResourceDescriptor], taken: &[bool]) -> Vec<ResourceDescriptor> {
    descriptors
        .iter()
        .zip(taken)
        .filter(|(_, taken)| !**taken)
        .map(|(descriptor, _)| descriptor.clone())
        .collect()
}
