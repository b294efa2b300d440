//! Error types for the tfmv matching tool.
//!
//! This module provides the error hierarchy for the two stages of a run:
//! loading the plan file and matching destroyed against created resources.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tfmv.
#[derive(Debug, Error)]
pub enum TfmvError {
    /// Plan loading and parsing errors.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Matching errors.
    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while loading the planning tool's JSON output.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan file was not found.
    #[error("Plan file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The plan file could not be parsed.
    #[error("Failed to parse plan: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },
}

/// Errors raised by the matching engine.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Destroyed and created counts differ for a resource type.
    ///
    /// Matching is aborted for the whole run; pairing under miscounted sets
    /// risks silently wrong state moves.
    #[error(
        "Cardinality mismatch for type '{resource_type}': {destroyed} destroyed vs {created} created"
    )]
    CardinalityMismatch {
        /// The offending resource type.
        resource_type: String,
        /// Number of destroyed resources of that type.
        destroyed: usize,
        /// Number of created resources of that type.
        created: usize,
    },
}

/// Result type alias for tfmv operations.
pub type Result<T> = std::result::Result<T, TfmvError>;

impl TfmvError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl PlanError {
    /// Creates a parse error with an optional source location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_mismatch_display() {
        let err = MatchError::CardinalityMismatch {
            resource_type: String::from("aws_s3_bucket"),
            destroyed: 2,
            created: 1,
        };

        let message = err.to_string();
        assert!(message.contains("aws_s3_bucket"));
        assert!(message.contains("2 destroyed"));
        assert!(message.contains("1 created"));
    }

    #[test]
    fn test_plan_error_wraps_into_tfmv_error() {
        let err: TfmvError = PlanError::FileNotFound {
            path: PathBuf::from("tfplan.json"),
        }
        .into();

        assert!(matches!(err, TfmvError::Plan(PlanError::FileNotFound { .. })));
    }
}
