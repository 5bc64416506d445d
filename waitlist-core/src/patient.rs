//! Patient records and their scored and ranked extensions.
//!
//! A [`Patient`] is an immutable input; scoring never mutates one. The
//! pipeline instead produces a [`ScoredPatient`] and later a
//! [`RankedPatient`], each carrying the original record plus the computed
//! fields, so no input field is dropped or renamed on the way out.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A patient record as sourced from the dataset.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// behavioral fields (`accepted_offers`, `canceled_offers`,
/// `average_reply_time`) may be absent; `Some(0)` is a present value and is
/// scored as such, never as missing.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waitlist_core::Patient;
///
/// let patient = Patient::new("p-1", "Ada Birch", Coord { x: -73.9, y: 40.7 })
///     .with_age(42.0)
///     .with_accepted_offers(12);
///
/// assert_eq!(patient.accepted_offers, Some(12));
/// assert_eq!(patient.canceled_offers, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Age in years, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// Geospatial position.
    #[serde(with = "latlon")]
    pub location: Coord<f64>,
    /// Historical count of accepted offers, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_offers: Option<u32>,
    /// Historical count of canceled offers, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_offers: Option<u32>,
    /// Mean reply latency in seconds, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_reply_time: Option<f64>,
}

impl Patient {
    /// Construct a record with no optional fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            location,
            accepted_offers: None,
            canceled_offers: None,
            average_reply_time: None,
        }
    }

    /// Set the age while returning `self` for chaining.
    #[must_use]
    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the accepted-offer count while returning `self` for chaining.
    #[must_use]
    pub fn with_accepted_offers(mut self, count: u32) -> Self {
        self.accepted_offers = Some(count);
        self
    }

    /// Set the canceled-offer count while returning `self` for chaining.
    #[must_use]
    pub fn with_canceled_offers(mut self, count: u32) -> Self {
        self.canceled_offers = Some(count);
        self
    }

    /// Set the mean reply latency while returning `self` for chaining.
    #[must_use]
    pub fn with_average_reply_time(mut self, seconds: f64) -> Self {
        self.average_reply_time = Some(seconds);
        self
    }
}

/// A patient together with its computed affinity score.
///
/// The score always lies between [`crate::SCORE_MIN`] and
/// [`crate::SCORE_MAX`] inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPatient {
    /// The original, unmodified record.
    #[serde(flatten)]
    pub patient: Patient,
    /// Affinity score on the 1–10 scale, rounded to two decimal places.
    pub score: f64,
}

/// A scored patient together with its final position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPatient {
    /// The scored record.
    #[serde(flatten)]
    pub scored: ScoredPatient,
    /// Dense 1-based rank; ties keep their input order.
    pub rank: u32,
}

/// Serialize a [`Coord`] as `{"latitude", "longitude"}`.
///
/// The source dataset encodes coordinates inconsistently, sometimes as JSON
/// numbers and sometimes as numeric strings, so deserialization accepts both.
mod latlon {
    use geo::Coord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct Encoded {
        latitude: f64,
        longitude: f64,
    }

    #[derive(Deserialize)]
    struct Decoded {
        latitude: Degrees,
        longitude: Degrees,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Degrees {
        Number(f64),
        Text(String),
    }

    impl Degrees {
        fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
            match self {
                Self::Number(value) => Ok(value),
                Self::Text(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid coordinate value {raw:?}"))),
            }
        }
    }

    pub fn serialize<S: Serializer>(coord: &Coord<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        Encoded {
            latitude: coord.y,
            longitude: coord.x,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coord<f64>, D::Error> {
        let decoded = Decoded::deserialize(deserializer)?;
        Ok(Coord {
            x: decoded.longitude.into_f64()?,
            y: decoded.latitude.into_f64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests should fail fast on bad fixtures")]
    #![expect(
        clippy::float_arithmetic,
        reason = "tests compare floating point values"
    )]

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn round_trips_camel_case_fields() {
        let patient = Patient::new("p-7", "Rin Okabe", Coord { x: 139.69, y: 35.68 })
            .with_age(58.0)
            .with_accepted_offers(0)
            .with_canceled_offers(3)
            .with_average_reply_time(1200.0);

        let json = serde_json::to_value(&patient).expect("serialize patient");
        assert_eq!(json["acceptedOffers"], 0);
        assert_eq!(json["canceledOffers"], 3);
        assert_eq!(json["averageReplyTime"], 1200.0);
        assert_eq!(json["location"]["latitude"], 35.68);
        assert_eq!(json["location"]["longitude"], 139.69);

        let back: Patient = serde_json::from_value(json).expect("deserialize patient");
        assert_eq!(back, patient);
    }

    #[rstest]
    fn accepts_string_coordinates() {
        let raw = r#"{
            "id": "p-2",
            "name": "Noor Haddad",
            "location": {"latitude": "48.7120", "longitude": "-97.1290"}
        }"#;

        let patient: Patient = serde_json::from_str(raw).expect("parse string coordinates");
        assert!((patient.location.y - 48.712).abs() < 1e-9);
        assert!((patient.location.x + 97.129).abs() < 1e-9);
        assert_eq!(patient.accepted_offers, None);
    }

    #[rstest]
    fn rejects_non_numeric_coordinates() {
        let raw = r#"{
            "id": "p-3",
            "name": "Sam Ellery",
            "location": {"latitude": "north", "longitude": 0.0}
        }"#;

        assert!(serde_json::from_str::<Patient>(raw).is_err());
    }

    #[rstest]
    fn absent_behavioral_fields_stay_absent_on_output() {
        let patient = Patient::new("p-4", "Io Marsh", Coord { x: 0.0, y: 0.0 });

        let json = serde_json::to_value(&patient).expect("serialize patient");
        let object = json.as_object().expect("object payload");
        assert!(!object.contains_key("acceptedOffers"));
        assert!(!object.contains_key("canceledOffers"));
        assert!(!object.contains_key("averageReplyTime"));
        assert!(!object.contains_key("age"));
    }

    #[rstest]
    fn ranked_output_keeps_every_input_field() {
        let patient = Patient::new("p-5", "Vera Lund", Coord { x: 10.75, y: 59.91 })
            .with_accepted_offers(40);
        let ranked = RankedPatient {
            scored: ScoredPatient {
                patient,
                score: 8.25,
            },
            rank: 1,
        };

        let json = serde_json::to_value(&ranked).expect("serialize ranked patient");
        assert_eq!(json["id"], "p-5");
        assert_eq!(json["name"], "Vera Lund");
        assert_eq!(json["acceptedOffers"], 40);
        assert_eq!(json["score"], 8.25);
        assert_eq!(json["rank"], 1);
    }
}
