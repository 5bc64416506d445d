//! The query target patients are scored against.

use geo::Coord;
use thiserror::Error;

/// A possibly-incomplete target location, as received from a query.
///
/// Both coordinates are optional so the scorer can distinguish "not
/// provided" from a legitimate value of `0` (the equator or the prime
/// meridian). [`TargetLocation::resolve`] performs that presence check.
///
/// # Examples
/// ```
/// use waitlist_core::TargetLocation;
///
/// let target = TargetLocation::new(0.0, 0.0);
/// assert!(target.resolve().is_ok());
///
/// let partial = TargetLocation {
///     latitude: Some(51.5),
///     longitude: None,
/// };
/// assert!(partial.resolve().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetLocation {
    /// Latitude in degrees, when provided.
    pub latitude: Option<f64>,
    /// Longitude in degrees, when provided.
    pub longitude: Option<f64>,
}

/// Error returned when a target is missing one or both coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("target location must provide both latitude and longitude")]
pub struct InvalidTargetLocation;

impl TargetLocation {
    /// Construct a fully-specified target.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Resolve into a concrete coordinate.
    ///
    /// A coordinate value of `0` is present and resolves normally; only an
    /// absent coordinate fails.
    ///
    /// # Errors
    /// Returns [`InvalidTargetLocation`] when either coordinate is absent.
    pub const fn resolve(self) -> Result<Coord<f64>, InvalidTargetLocation> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coord {
                x: longitude,
                y: latitude,
            }),
            _ => Err(InvalidTargetLocation),
        }
    }
}
