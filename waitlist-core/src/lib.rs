//! Core domain types for the waitlist ranking engine.
//!
//! The crate defines the patient records exchanged with the scorer, the
//! possibly-incomplete query target, the great-circle distance utility, and
//! the read-only [`PatientStore`] trait the data layer implements. Scoring
//! itself lives in `waitlist-scorer`; nothing here mutates a record.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod patient;
mod store;
mod target;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{EARTH_RADIUS_M, distance, distance_with_accuracy};
pub use patient::{Patient, RankedPatient, ScoredPatient};
pub use store::PatientStore;
pub use target::{InvalidTargetLocation, TargetLocation};

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub use test_support::MemoryStore;

/// Lowest score the engine assigns, also the sentinel for degraded records.
pub const SCORE_MIN: f64 = 1.0;

/// Highest score the engine assigns.
pub const SCORE_MAX: f64 = 10.0;
