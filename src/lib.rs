//! Facade crate for the waitlist ranking engine.
//!
//! This crate re-exports the core domain types alongside the affinity scorer
//! so downstream consumers can depend on a single crate.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use waitlist_engine::{AffinityScorer, DEFAULT_LIMIT, Patient, TargetLocation};
//!
//! let population = vec![
//!     Patient::new("p-1", "Ada Birch", Coord { x: -73.9, y: 40.7 })
//!         .with_accepted_offers(80)
//!         .with_canceled_offers(1)
//!         .with_average_reply_time(300.0),
//!     Patient::new("p-2", "Jo Whittle", Coord { x: -0.13, y: 51.5 }),
//! ];
//!
//! let scorer = AffinityScorer::default();
//! let target = TargetLocation::new(40.7, -73.9);
//! let ranked = scorer.rank_top_patients(&population, target, DEFAULT_LIMIT)?;
//!
//! assert_eq!(ranked.len(), 2);
//! assert_eq!(ranked[0].rank, 1);
//! # Ok::<(), waitlist_engine::RankError>(())
//! ```

#![forbid(unsafe_code)]

pub use waitlist_core::{
    EARTH_RADIUS_M, InvalidTargetLocation, Patient, PatientStore, RankedPatient, SCORE_MAX,
    SCORE_MIN, ScoredPatient, TargetLocation, distance, distance_with_accuracy,
};

pub use waitlist_scorer::{
    AffinityScorer, DEFAULT_LIMIT, FactorWeights, RankError, ScoreError, normalize,
};

#[cfg(feature = "test-support")]
pub use waitlist_core::MemoryStore;
