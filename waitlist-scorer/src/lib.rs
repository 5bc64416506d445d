//! Affinity scoring for waitlist patients.
//!
//! The crate turns a [`Patient`] and a query target into a score on the 1–10
//! scale, then ranks a whole population by that score:
//! - **Factor normalization** maps age, great-circle distance, and the three
//!   behavioral signals (accepted offers, canceled offers, reply latency)
//!   into `0.0..=1.0`, inverting the factors where lower raw values are
//!   better.
//! - **Weighted combination** blends the factors with [`FactorWeights`],
//!   substituting a fixed neutral contribution for behavioral factors that
//!   are absent from the record.
//! - **Missing-data randomness** adds a bounded, upward-only adjustment
//!   proportional to how many behavioral fields are missing, so records with
//!   thin history still surface occasionally instead of sinking permanently.
//! - **Ranking** scores a population, degrades per-record faults to the
//!   minimum score instead of failing the batch, and returns the top records
//!   with dense 1-based ranks.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use waitlist_core::{Patient, TargetLocation};
//! use waitlist_scorer::AffinityScorer;
//!
//! let scorer = AffinityScorer::default();
//! let patient = Patient::new("p-1", "Ada Birch", Coord { x: -73.9, y: 40.7 })
//!     .with_accepted_offers(75)
//!     .with_canceled_offers(2)
//!     .with_average_reply_time(600.0);
//!
//! let score = scorer.compute_score(&patient, TargetLocation::new(40.7, -73.9))?;
//! assert!((1.0..=10.0).contains(&score));
//! # Ok::<(), waitlist_scorer::ScoreError>(())
//! ```

#![forbid(unsafe_code)]

use geo::Coord;
use rand::Rng;
use waitlist_core::{Patient, SCORE_MAX, SCORE_MIN, TargetLocation, distance};

mod error;
mod rank;

pub use error::{RankError, ScoreError};
pub use rank::DEFAULT_LIMIT;

/// Upper bound of the age factor, in years.
const AGE_CEILING_YEARS: f64 = 100.0;

/// Saturation ceiling of the distance factor, in metres. Beyond this every
/// distance scores equally low.
const DISTANCE_CEILING_M: f64 = 4_500_000.0;

/// Upper bound of both offer-count factors.
const OFFER_CEILING: f64 = 100.0;

/// Upper bound of the reply-latency factor, in seconds.
const REPLY_TIME_CEILING_SECS: f64 = 3_600.0;

/// Weighted contribution substituted for a missing behavioral factor.
///
/// Deliberately below the 0.5 neutral midpoint used inside [`normalize`]:
/// missing behavioral history is penalised, not treated as average.
const MISSING_FACTOR_CONTRIBUTION: f64 = 0.2;

/// Widest possible upward noise adjustment, reached when all three
/// behavioral fields are missing.
const NOISE_SPAN: f64 = 0.5;

/// Number of behavioral fields eligible for the missing-data adjustment.
const BEHAVIORAL_FIELD_COUNT: f64 = 3.0;

/// Linearly map `value` into `0.0..=1.0`, clamping at both ends.
///
/// `None` maps to the neutral midpoint `0.5`, a "no information" signal
/// distinct from zero. `Some(min)` maps to exactly `0.0` and `Some(max)` to
/// exactly `1.0`.
///
/// # Examples
/// ```
/// use waitlist_scorer::normalize;
///
/// assert_eq!(normalize(Some(0.0), 0.0, 100.0), 0.0);
/// assert_eq!(normalize(Some(250.0), 0.0, 100.0), 1.0);
/// assert_eq!(normalize(None, 0.0, 100.0), 0.5);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "normalization is a linear rescale of bounded values"
)]
pub fn normalize(value: Option<f64>, min: f64, max: f64) -> f64 {
    value.map_or(0.5, |present| ((present - min) / (max - min)).clamp(0.0, 1.0))
}

/// Relative weighting of the five scoring factors.
///
/// The defaults favour behavioral history over demographics and proximity.
/// Weights need not sum to one; the scorer divides by the total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    /// Multiplier applied to the age factor.
    pub age: f64,
    /// Multiplier applied to the proximity factor.
    pub distance: f64,
    /// Multiplier applied to the accepted-offer factor.
    pub accepted_offers: f64,
    /// Multiplier applied to the canceled-offer factor.
    pub canceled_offers: f64,
    /// Multiplier applied to the reply-latency factor.
    pub reply_time: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            age: 0.10,
            distance: 0.10,
            accepted_offers: 0.30,
            canceled_offers: 0.30,
            reply_time: 0.20,
        }
    }
}

impl FactorWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidWeights`] when any weight is non-finite
    /// or negative, or when the total weight is zero.
    pub fn validate(self) -> Result<Self, ScoreError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ScoreError::InvalidWeights)
        }
    }

    const fn is_valid(self) -> bool {
        self.has_finite_values() && self.has_non_negative_values() && self.has_non_zero_total()
    }

    const fn has_finite_values(self) -> bool {
        self.age.is_finite()
            && self.distance.is_finite()
            && self.accepted_offers.is_finite()
            && self.canceled_offers.is_finite()
            && self.reply_time.is_finite()
    }

    const fn has_non_negative_values(self) -> bool {
        self.age >= 0.0
            && self.distance >= 0.0
            && self.accepted_offers >= 0.0
            && self.canceled_offers >= 0.0
            && self.reply_time >= 0.0
    }

    const fn has_non_zero_total(self) -> bool {
        self.total() != 0.0
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the total weight is the normalization divisor"
    )]
    const fn total(self) -> f64 {
        self.age + self.distance + self.accepted_offers + self.canceled_offers + self.reply_time
    }
}

/// Scorer blending proximity with behavioral history.
///
/// The scorer is stateless apart from its weights; the random source for the
/// missing-data adjustment is supplied per call, so one scorer can serve
/// concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AffinityScorer {
    weights: FactorWeights,
}

impl AffinityScorer {
    /// Construct a scorer with validated weights.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidWeights`] when the weights are unusable.
    pub fn new(weights: FactorWeights) -> Result<Self, ScoreError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Return the weights in effect.
    #[must_use]
    pub const fn weights(&self) -> FactorWeights {
        self.weights
    }

    /// Score `patient` against `target` using the thread-local generator for
    /// the missing-data adjustment.
    ///
    /// The result always lies in `[SCORE_MIN, SCORE_MAX]`. Records with no
    /// missing behavioral fields never consume randomness, so repeated calls
    /// with identical inputs return identical scores.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidTarget`] when `target` is missing a
    /// coordinate (a coordinate of `0` is present, not missing), and
    /// [`ScoreError::NonFiniteScore`] when factor computation produces a
    /// non-finite value, e.g. from NaN coordinates in the record.
    pub fn compute_score(
        &self,
        patient: &Patient,
        target: TargetLocation,
    ) -> Result<f64, ScoreError> {
        self.compute_score_with(patient, target, &mut rand::thread_rng())
    }

    /// Score `patient` against `target` drawing any missing-data adjustment
    /// from `rng`.
    ///
    /// # Errors
    /// As [`AffinityScorer::compute_score`].
    pub fn compute_score_with<R: Rng + ?Sized>(
        &self,
        patient: &Patient,
        target: TargetLocation,
        rng: &mut R,
    ) -> Result<f64, ScoreError> {
        let resolved = target
            .resolve()
            .map_err(|source| ScoreError::InvalidTarget { source })?;
        self.score_resolved(patient, resolved, rng)
    }

    pub(crate) fn score_resolved<R: Rng + ?Sized>(
        &self,
        patient: &Patient,
        target: Coord<f64>,
        rng: &mut R,
    ) -> Result<f64, ScoreError> {
        let blended = self.weighted_sum(patient, target);
        let adjusted = apply_missing_data_noise(blended, missing_behavioral_fields(patient), rng);

        let score =
            round_to_hundredths(adjusted.mul_add(9.0, 1.0)).clamp(SCORE_MIN, SCORE_MAX);
        if score.is_finite() {
            Ok(score)
        } else {
            Err(ScoreError::NonFiniteScore {
                patient_id: patient.id.clone(),
            })
        }
    }

    /// Blend the five normalized factors into `0.0..=1.0`.
    ///
    /// Missing behavioral factors contribute the fixed
    /// `MISSING_FACTOR_CONTRIBUTION` instead of the 0.5 midpoint `normalize`
    /// would produce; a present value of zero contributes exactly zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "the weighted blend is the scoring heuristic itself"
    )]
    fn weighted_sum(&self, patient: &Patient, target: Coord<f64>) -> f64 {
        let weights = self.weights;

        let age_factor = normalize(patient.age, 0.0, AGE_CEILING_YEARS);
        let proximity_factor = 1.0
            - normalize(
                Some(distance(patient.location, target)),
                0.0,
                DISTANCE_CEILING_M,
            );
        let accepted_factor = patient
            .accepted_offers
            .map(|count| normalize(Some(f64::from(count)), 0.0, OFFER_CEILING));
        let canceled_factor = patient
            .canceled_offers
            .map(|count| 1.0 - normalize(Some(f64::from(count)), 0.0, OFFER_CEILING));
        let reply_factor = patient
            .average_reply_time
            .map(|seconds| 1.0 - normalize(Some(seconds), 0.0, REPLY_TIME_CEILING_SECS));

        let blended = age_factor * weights.age
            + proximity_factor * weights.distance
            + accepted_factor.unwrap_or(MISSING_FACTOR_CONTRIBUTION) * weights.accepted_offers
            + canceled_factor.unwrap_or(MISSING_FACTOR_CONTRIBUTION) * weights.canceled_offers
            + reply_factor.unwrap_or(MISSING_FACTOR_CONTRIBUTION) * weights.reply_time;

        blended / weights.total()
    }
}

/// Count the behavioral fields absent from `patient`, in `0..=3`.
fn missing_behavioral_fields(patient: &Patient) -> u32 {
    u32::from(patient.accepted_offers.is_none())
        + u32::from(patient.canceled_offers.is_none())
        + u32::from(patient.average_reply_time.is_none())
}

/// Add the upward-only missing-data adjustment and clamp back into
/// `0.0..=1.0`.
///
/// One uniform draw `u` in `[0, 1)` scales with the missing count, up to
/// `NOISE_SPAN` when all three behavioral fields are absent. Fully-specified
/// records pass through without consuming randomness.
#[expect(
    clippy::float_arithmetic,
    reason = "the adjustment is a bounded random perturbation"
)]
fn apply_missing_data_noise<R: Rng + ?Sized>(raw: f64, missing: u32, rng: &mut R) -> f64 {
    if missing == 0 {
        return raw;
    }
    let boost = rng.gen_range(0.0..1.0) * NOISE_SPAN * f64::from(missing) / BEHAVIORAL_FIELD_COUNT;
    (raw + boost).clamp(0.0, 1.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "rounding to two decimal places multiplies and divides by 100"
)]
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
