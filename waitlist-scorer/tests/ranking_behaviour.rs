//! Behavioural coverage for population ranking and selection.

#![expect(clippy::expect_used, reason = "tests should fail fast when setup breaks")]
#![expect(
    clippy::float_arithmetic,
    reason = "tests compare floating point values"
)]

use geo::Coord;
use rand::rngs::mock::StepRng;
use rstest::{fixture, rstest};
use waitlist_core::{Patient, SCORE_MIN, TargetLocation};
use waitlist_scorer::{AffinityScorer, DEFAULT_LIMIT, RankError};

const ORIGIN: TargetLocation = TargetLocation::new(0.0, 0.0);

fn at_origin(id: &str) -> Patient {
    Patient::new(id, id, Coord { x: 0.0, y: 0.0 })
}

/// Three records engineered to land on distinct, known scores:
/// 9.55, 5.95, and 2.35, listed here out of order.
#[fixture]
fn population() -> Vec<Patient> {
    vec![
        at_origin("p-mid")
            .with_accepted_offers(50)
            .with_canceled_offers(50)
            .with_average_reply_time(1_800.0),
        at_origin("p-best")
            .with_accepted_offers(100)
            .with_canceled_offers(0)
            .with_average_reply_time(0.0),
        at_origin("p-worst")
            .with_accepted_offers(0)
            .with_canceled_offers(100)
            .with_average_reply_time(3_600.0),
    ]
}

#[rstest]
fn orders_descending_with_dense_ranks(population: Vec<Patient>) {
    let scorer = AffinityScorer::default();
    let ranked = scorer
        .rank_top_patients(&population, ORIGIN, DEFAULT_LIMIT)
        .expect("rank population");

    let ids: Vec<&str> = ranked.iter().map(|r| r.scored.patient.id.as_str()).collect();
    assert_eq!(ids, ["p-best", "p-mid", "p-worst"]);

    let scores: Vec<f64> = ranked.iter().map(|r| r.scored.score).collect();
    assert!((scores[0] - 9.55).abs() < 1e-9, "got {:?}", scores);
    assert!((scores[1] - 5.95).abs() < 1e-9, "got {:?}", scores);
    assert!((scores[2] - 2.35).abs() < 1e-9, "got {:?}", scores);

    let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, [1, 2, 3]);
}

#[rstest]
fn truncates_to_the_requested_limit(population: Vec<Patient>) {
    let scorer = AffinityScorer::default();
    let ranked = scorer
        .rank_top_patients(&population, ORIGIN, 2)
        .expect("rank population");

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].scored.patient.id, "p-best");
    assert_eq!(ranked[1].scored.patient.id, "p-mid");
}

#[rstest]
fn a_limit_beyond_the_population_returns_everyone(population: Vec<Patient>) {
    let scorer = AffinityScorer::default();
    let ranked = scorer
        .rank_top_patients(&population, ORIGIN, 50)
        .expect("rank population");
    assert_eq!(ranked.len(), population.len());
}

#[rstest]
fn exact_ties_keep_their_input_order() {
    let scorer = AffinityScorer::default();
    let twins = vec![
        at_origin("p-first")
            .with_accepted_offers(50)
            .with_canceled_offers(50)
            .with_average_reply_time(1_800.0),
        at_origin("p-second")
            .with_accepted_offers(50)
            .with_canceled_offers(50)
            .with_average_reply_time(1_800.0),
    ];

    let ranked = scorer
        .rank_top_patients(&twins, ORIGIN, DEFAULT_LIMIT)
        .expect("rank twins");

    assert_eq!(ranked[0].scored.score, ranked[1].scored.score);
    assert_eq!(ranked[0].scored.patient.id, "p-first");
    assert_eq!(ranked[1].scored.patient.id, "p-second");
    assert_eq!((ranked[0].rank, ranked[1].rank), (1, 2));
}

#[rstest]
fn a_record_that_cannot_be_scored_degrades_instead_of_failing(population: Vec<Patient>) {
    let scorer = AffinityScorer::default();
    let mut with_broken = population;
    let mut broken = at_origin("p-broken")
        .with_accepted_offers(100)
        .with_canceled_offers(0)
        .with_average_reply_time(0.0);
    broken.location = Coord {
        x: f64::NAN,
        y: 0.0,
    };
    with_broken.insert(0, broken);

    let mut rng = StepRng::new(0, 0);
    let ranked = scorer
        .rank_top_patients_with(&with_broken, ORIGIN, DEFAULT_LIMIT, &mut rng)
        .expect("rank population with a broken record");

    assert_eq!(ranked.len(), 4);
    let last = ranked.last().expect("non-empty ranking");
    assert_eq!(last.scored.patient.id, "p-broken");
    assert_eq!(last.scored.score, SCORE_MIN);
    assert_eq!(last.rank, 4);
}

#[rstest]
fn an_empty_population_is_a_distinct_failure() {
    let scorer = AffinityScorer::default();
    let result = scorer.rank_top_patients(&[], ORIGIN, DEFAULT_LIMIT);
    assert_eq!(result, Err(RankError::NoPatientData));
}

#[rstest]
fn an_incomplete_target_propagates_out_of_ranking(population: Vec<Patient>) {
    let scorer = AffinityScorer::default();
    let target = TargetLocation {
        latitude: Some(45.0),
        longitude: None,
    };
    let result = scorer.rank_top_patients(&population, target, DEFAULT_LIMIT);
    assert!(matches!(result, Err(RankError::InvalidTarget { .. })));
}
