//! Query-parameter validation for the patients endpoint.
//!
//! Coordinates arrive as raw strings so a malformed value can be reported
//! with a field-specific message instead of a generic deserialization
//! rejection. A valid query yields a fully-specified [`TargetLocation`].

use serde::Deserialize;
use waitlist_core::TargetLocation;

const LATITUDE_BOUNDS: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_BOUNDS: (f64, f64) = (-180.0, 180.0);

/// Raw query parameters of `GET /patients`.
#[derive(Debug, Default, Deserialize)]
pub struct PatientsQuery {
    /// Raw latitude parameter, when provided.
    pub latitude: Option<String>,
    /// Raw longitude parameter, when provided.
    pub longitude: Option<String>,
}

/// Validate the raw query into a target location.
///
/// # Errors
/// Returns every violation found, one message per offending field, so a
/// request missing both coordinates reports both at once.
pub fn validate(query: &PatientsQuery) -> Result<TargetLocation, Vec<String>> {
    let mut violations = Vec::new();
    let latitude = validate_coordinate(
        query.latitude.as_deref(),
        "Latitude",
        LATITUDE_BOUNDS,
        &mut violations,
    );
    let longitude = validate_coordinate(
        query.longitude.as_deref(),
        "Longitude",
        LONGITUDE_BOUNDS,
        &mut violations,
    );

    match (latitude, longitude) {
        (Some(lat), Some(lon)) if violations.is_empty() => Ok(TargetLocation::new(lat, lon)),
        _ => Err(violations),
    }
}

fn validate_coordinate(
    raw: Option<&str>,
    field: &str,
    (min, max): (f64, f64),
    violations: &mut Vec<String>,
) -> Option<f64> {
    let Some(text) = raw else {
        violations.push(format!("{field} is required"));
        return None;
    };
    let value = match text.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => {
            violations.push(format!("{field} must be a valid number"));
            return None;
        }
    };
    if value < min {
        violations.push(format!("{field} must be at least {min}"));
        return None;
    }
    if value > max {
        violations.push(format!("{field} must be at most {max}"));
        return None;
    }
    Some(value)
}
