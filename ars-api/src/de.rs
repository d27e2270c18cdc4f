//! Deserialization helpers for sloppy backend payloads.

use std::fmt;

use serde::de::{Deserializer, Error, Visitor};

/// Deserialize an `f64` from either a JSON number or a numeric string.
///
/// Station and municipality coordinates come back as numbers from some
/// deployments and as strings from others, so both must parse.
pub(crate) fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlexF64;

    impl<'de> Visitor<'de> for FlexF64 {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a number or a numeric string")
        }

        fn visit_f64<E: Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<f64, E> {
            v.trim().parse::<f64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(FlexF64)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Coord {
        #[serde(deserialize_with = "super::flexible_f64")]
        value: f64,
    }

    #[test]
    fn accepts_json_number() {
        let c: Coord = serde_json::from_str(r#"{"value": 3.42}"#).unwrap();
        assert!((c.value - 3.42).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_numeric_string() {
        let c: Coord = serde_json::from_str(r#"{"value": "-76.55"}"#).unwrap();
        assert!((c.value + 76.55).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_integer() {
        let c: Coord = serde_json::from_str(r#"{"value": 4}"#).unwrap();
        assert!((c.value - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_numeric_string() {
        let result: Result<Coord, _> = serde_json::from_str(r#"{"value": "norte"}"#);
        assert!(result.is_err());
    }
}
