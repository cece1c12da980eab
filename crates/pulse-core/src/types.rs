//! Custom types for common data structures and validation

use chrono::{DateTime as ChronoDateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;
use utoipa::ToSchema;

/// Canonical UTC DateTime type used across all Pulse crates
///
/// Covers database TIMESTAMPTZ columns, time bucketing results from
/// TimescaleDB, and API responses (serialized as ISO 8601 with 'Z' suffix).
pub type UtcDateTime = ChronoDateTime<Utc>;

/// Wrapper type for DateTime<Utc> that automatically parses ISO 8601 format
/// Accepts multiple formats:
/// - `2024-01-15T14:30:00` (naive datetime, assumes UTC)
/// - `2024-01-15T14:30:00Z` (UTC)
/// - `2024-01-15T14:30:00+00:00` (with timezone offset)
///
/// All formats are converted to DateTime<Utc>. Serializes with 'Z' suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ToSchema)]
#[schema(value_type = String, example = "2024-01-15T14:30:00Z")]
pub struct DateTime(pub ChronoDateTime<Utc>);

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;

        // Try parsing as RFC3339 (with timezone) first
        if let Ok(dt) = s.parse::<ChronoDateTime<Utc>>() {
            return Ok(DateTime(dt));
        }

        // Try parsing as naive datetime (YYYY-MM-DDTHH:MM:SS) and assume UTC
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S") {
            let dt = ChronoDateTime::<Utc>::from_naive_utc_and_offset(naive_dt, Utc);
            return Ok(DateTime(dt));
        }

        Err(serde::de::Error::custom(
            "Invalid datetime format. Use ISO 8601: YYYY-MM-DDTHH:MM:SSZ",
        ))
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as RFC3339 with 'Z' suffix
        let formatted = self.0.to_rfc3339();
        serializer.serialize_str(&formatted)
    }
}

// Allow using DateTime like DateTime<Utc>
impl Deref for DateTime {
    type Target = ChronoDateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Conversions
impl From<ChronoDateTime<Utc>> for DateTime {
    fn from(dt: ChronoDateTime<Utc>) -> Self {
        DateTime(dt)
    }
}

impl From<DateTime> for ChronoDateTime<Utc> {
    fn from(dt: DateTime) -> Self {
        dt.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_datetime_deserialize_naive() {
        let json = r#""2024-01-15T14:30:00""#;
        let dt: DateTime = serde_json::from_str(json).unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_datetime_deserialize_rfc3339_utc() {
        let json = r#""2024-01-15T14:30:00Z""#;
        let dt: DateTime = serde_json::from_str(json).unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_datetime_deserialize_rfc3339_timezone_conversion() {
        // 2024-01-15 16:30:00 in +02:00 timezone should be 14:30:00 UTC
        let json = r#""2024-01-15T16:30:00+02:00""#;
        let dt: DateTime = serde_json::from_str(json).unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_datetime_deserialize_invalid() {
        let json = r#""not-a-date""#;
        let result: Result<DateTime, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_datetime_serialize() {
        let naive =
            NaiveDateTime::parse_from_str("2024-01-15T14:30:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let dt = DateTime(ChronoDateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, r#""2024-01-15T14:30:00+00:00""#);
    }

    #[test]
    fn test_datetime_deref() {
        let naive =
            NaiveDateTime::parse_from_str("2024-01-15T14:30:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let dt = DateTime(ChronoDateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        assert_eq!(dt.year(), 2024);
        assert_eq!(*dt, dt.0);
    }
}
