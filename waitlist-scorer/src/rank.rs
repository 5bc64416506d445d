//! Rank a patient population by affinity score.

use rand::Rng;
use waitlist_core::{Patient, RankedPatient, SCORE_MIN, ScoredPatient, TargetLocation};

use crate::{AffinityScorer, RankError};

/// Number of records returned when the caller does not specify a limit.
pub const DEFAULT_LIMIT: usize = 10;

impl AffinityScorer {
    /// Score `patients` against `target` and return the top `limit` records,
    /// using the thread-local generator for missing-data adjustments.
    ///
    /// A record whose score cannot be computed does not fail the batch: it
    /// is logged and ranked with the minimum score instead. The result is
    /// sorted descending by score (ties keep their input order), truncated
    /// to `limit`, and assigned dense 1-based ranks.
    ///
    /// # Errors
    /// Returns [`RankError::NoPatientData`] when `patients` is empty and
    /// [`RankError::InvalidTarget`] when `target` is missing a coordinate.
    pub fn rank_top_patients(
        &self,
        patients: &[Patient],
        target: TargetLocation,
        limit: usize,
    ) -> Result<Vec<RankedPatient>, RankError> {
        self.rank_top_patients_with(patients, target, limit, &mut rand::thread_rng())
    }

    /// Score and rank as [`AffinityScorer::rank_top_patients`], drawing
    /// missing-data adjustments from `rng`.
    ///
    /// # Errors
    /// As [`AffinityScorer::rank_top_patients`].
    pub fn rank_top_patients_with<R: Rng + ?Sized>(
        &self,
        patients: &[Patient],
        target: TargetLocation,
        limit: usize,
        rng: &mut R,
    ) -> Result<Vec<RankedPatient>, RankError> {
        if patients.is_empty() {
            return Err(RankError::NoPatientData);
        }
        let resolved = target
            .resolve()
            .map_err(|source| RankError::InvalidTarget { source })?;

        let mut scored: Vec<ScoredPatient> = patients
            .iter()
            .map(|patient| {
                let score = self
                    .score_resolved(patient, resolved, rng)
                    .unwrap_or_else(|error| {
                        log::warn!(
                            "failed to score patient {id}: {error}; substituting the minimum score",
                            id = patient.id
                        );
                        SCORE_MIN
                    });
                ScoredPatient {
                    patient: patient.clone(),
                    score,
                }
            })
            .collect();

        // slice::sort_by is stable, so exact ties keep their input order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .zip(1_u32..)
            .map(|(record, rank)| RankedPatient {
                scored: record,
                rank,
            })
            .collect())
    }
}
