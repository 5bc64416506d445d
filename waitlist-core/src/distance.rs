//! Great-circle surface distance between two WGS84 coordinates.

use geo::Coord;

/// Earth radius in metres used for distance computation.
///
/// This is the WGS-84 *equatorial* radius, not the mean radius; the value
/// matches the reference dataset's distance figures and must not be swapped
/// for 6,371,000 m without re-deriving every distance-derived score.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Distance in metres between `a` and `b`, rounded to the nearest metre.
///
/// Uses the spherical law of cosines. Coordinates are not validated here:
/// non-finite inputs propagate as NaN.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waitlist_core::distance;
///
/// let greenwich = Coord { x: 0.0, y: 51.4779 };
/// assert_eq!(distance(greenwich, greenwich), 0.0);
/// ```
#[must_use]
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    distance_with_accuracy(a, b, 1.0)
}

/// Distance in metres rounded to the nearest multiple of `accuracy`.
///
/// The cosine sum is clamped into `[-1, 1]` before `acos`: floating-point
/// rounding can push it fractionally outside the domain for coincident or
/// antipodal points, which would otherwise yield NaN.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "great-circle distance is floating-point trigonometry"
)]
pub fn distance_with_accuracy(a: Coord<f64>, b: Coord<f64>, accuracy: f64) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let delta_lon = (a.x - b.x).to_radians();

    let cosine = lat_b
        .sin()
        .mul_add(lat_a.sin(), lat_b.cos() * lat_a.cos() * delta_lon.cos())
        .clamp(-1.0, 1.0);

    let metres = cosine.acos() * EARTH_RADIUS_M;
    (metres / accuracy).round() * accuracy
}
