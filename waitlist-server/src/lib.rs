//! HTTP surface for the waitlist ranking engine.
//!
//! One route, `GET /patients`, validates the query coordinates, ranks the
//! in-memory patient population against them, and returns the top records as
//! JSON. Ranking errors map onto the response taxonomy: invalid coordinates
//! are a client error (400), an empty dataset is a service-availability
//! error (503), and an empty result after truncation is an ordinary 200 with
//! an empty list.

#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use waitlist_core::{Patient, RankedPatient};
use waitlist_data::JsonStoreError;
use waitlist_scorer::{AffinityScorer, RankError};

pub mod query;

pub use query::PatientsQuery;

/// Errors raised while starting the service.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Loading the patient dataset failed.
    #[error("failed to load the patient dataset")]
    LoadDataset {
        /// Source error from the data layer.
        #[source]
        source: JsonStoreError,
    },
    /// Binding the listen address failed.
    #[error("failed to bind {addr}")]
    Bind {
        /// Requested listen address.
        addr: String,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The server loop terminated with an error.
    #[error("server terminated unexpectedly")]
    Serve {
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}

/// Shared, read-only request-handling state.
///
/// The population is loaded once at startup and never mutated, so handlers
/// share it through an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    patients: Arc<Vec<Patient>>,
    scorer: AffinityScorer,
    limit: usize,
}

impl AppState {
    /// Bundle the population, scorer, and per-query record limit.
    #[must_use]
    pub fn new(patients: Vec<Patient>, scorer: AffinityScorer, limit: usize) -> Self {
        Self {
            patients: Arc::new(patients),
            scorer,
            limit,
        }
    }
}

/// Build the application router.
///
/// CORS is permissive: the endpoint is read-only and unauthenticated.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/patients", get(top_patients))
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct PatientsResponse {
    data: Vec<RankedPatient>,
    meta: ResponseMeta,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseMeta {
    response_time: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    message: String,
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

async fn top_patients(
    State(state): State<AppState>,
    Query(raw): Query<PatientsQuery>,
) -> Response {
    let started = Instant::now();

    let target = match query::validate(&raw) {
        Ok(target) => target,
        Err(details) => {
            log::warn!("rejected patients query: {details:?}");
            return error_response(
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(details),
            );
        }
    };

    match state
        .scorer
        .rank_top_patients(&state.patients, target, state.limit)
    {
        Ok(data) => {
            let meta = ResponseMeta {
                response_time: format!("{}ms", started.elapsed().as_millis()),
            };
            (StatusCode::OK, Json(PatientsResponse { data, meta })).into_response()
        }
        Err(RankError::InvalidTarget { .. }) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid coordinates provided", None)
        }
        Err(RankError::NoPatientData) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Patient data service unavailable",
            None,
        ),
    }
}

fn error_response(
    status: StatusCode,
    message: &str,
    details: Option<Vec<String>>,
) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            message: message.to_owned(),
            status_code: status.as_u16(),
            details,
        },
    };
    (status, Json(body)).into_response()
}
