//! Error types raised while scoring and ranking patients.
#![forbid(unsafe_code)]

use thiserror::Error;
use waitlist_core::InvalidTargetLocation;

/// Errors raised while computing a single affinity score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The query target was missing a coordinate.
    #[error("invalid target location")]
    InvalidTarget {
        /// Presence-check failure from the core.
        #[source]
        source: InvalidTargetLocation,
    },
    /// Factor computation produced a non-finite value.
    #[error("score for patient {patient_id} is not finite")]
    NonFiniteScore {
        /// Identifier of the affected patient.
        patient_id: String,
    },
    /// Provided weights were unusable.
    #[error("factor weights must be finite, non-negative, and sum to a positive value")]
    InvalidWeights,
}

/// Errors raised while ranking a patient population.
///
/// Per-patient scoring faults never surface here; ranking degrades them to
/// the minimum score. Only the two population-level failures propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// The patient population was empty or absent.
    #[error("no patient data available")]
    NoPatientData,
    /// The query target was missing a coordinate.
    #[error("invalid target location")]
    InvalidTarget {
        /// Presence-check failure from the core.
        #[source]
        source: InvalidTargetLocation,
    },
}
