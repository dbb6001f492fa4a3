//! Serde helpers for server timestamps.
//!
//! The server emits ISO 8601 datetimes that may or may not carry a UTC
//! offset. Offset-less values are interpreted as UTC. Serialization always
//! produces RFC 3339.

use serde::{Deserialize, Deserializer, Serializer, de};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const NAIVE_FORMAT: &[time::format_description::FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// Parses an ISO 8601 datetime string, assuming UTC when no offset is given.
pub fn parse(value: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed);
    }
    PrimitiveDateTime::parse(value, NAIVE_FORMAT)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Deserializes an [`OffsetDateTime`] from a server timestamp string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse(&value).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {value}")))
}

/// Serializes an [`OffsetDateTime`] as RFC 3339.
pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = value
        .format(&Rfc3339)
        .map_err(|err| serde::ser::Error::custom(format!("invalid timestamp: {err}")))?;
    serializer.serialize_str(&formatted)
}

/// Serde helpers for optional server timestamps.
pub mod optional {
    use super::*;

    /// Deserializes an optional [`OffsetDateTime`].
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        match value {
            Some(value) => super::parse(&value)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {value}"))),
            None => Ok(None),
        }
    }

    /// Serializes an optional [`OffsetDateTime`].
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parse_rfc3339() {
        assert_eq!(
            parse("2025-02-19T00:00:00Z"),
            Some(datetime!(2025-02-19 0:00:00 UTC))
        );
    }

    #[test]
    fn parse_naive_assumes_utc() {
        assert_eq!(
            parse("2025-02-19T12:30:45"),
            Some(datetime!(2025-02-19 12:30:45 UTC))
        );
    }

    #[test]
    fn parse_naive_with_microseconds() {
        assert_eq!(
            parse("2025-02-19T12:30:45.123456"),
            Some(datetime!(2025-02-19 12:30:45.123456 UTC))
        );
    }

    #[test]
    fn parse_garbage() {
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse(""), None);
    }
}
