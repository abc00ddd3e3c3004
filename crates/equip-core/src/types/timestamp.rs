//! Server timestamps.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Offset-less forms accepted after RFC 3339, most specific first.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// An ISO-8601 instant as carried in `createdAt`/`updatedAt`.
///
/// The text is kept exactly as the collection sent it so records echo back
/// unchanged; the parsed instant is used for ordering and display. Values
/// without an offset are read as local time, as a browser would. Locally
/// created values are rendered like `toISOString()`
/// (`2024-01-01T09:30:00.000Z`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    text: String,
}

impl Timestamp {
    /// The current instant, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from(Utc::now().trunc_subsecs(3))
    }

    /// Parse an ISO-8601 date-time: RFC 3339, or a local date-time without
    /// an offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither form, or names a local time
    /// that does not exist.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let instant = match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => Self::parse_local(s).ok_or_else(|| -> Error {
                InvalidInputError::Timestamp {
                    value: s.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })?,
        };

        Ok(Self {
            instant,
            text: s.to_string(),
        })
    }

    fn parse_local(s: &str) -> Option<DateTime<Utc>> {
        let naive = LOCAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Returns the parsed instant in UTC.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.instant
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            text: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timestamp::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_values_render_like_to_iso_string() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap());
        assert_eq!(ts.to_string(), "2024-01-01T09:30:00.000Z");
    }

    #[test]
    fn keeps_the_received_text() {
        for raw in [
            "2024-01-01T09:30:00Z",
            "2024-01-01T18:30:00.250+09:00",
            "2024-01-01T09:00:00",
        ] {
            let ts = Timestamp::parse(raw).unwrap();
            assert_eq!(ts.to_string(), raw);
            assert_eq!(serde_json::to_value(&ts).unwrap(), raw);
        }
    }

    #[test]
    fn offsets_are_resolved_for_the_instant() {
        let ts = Timestamp::parse("2024-01-01T18:30:00.250+09:00").unwrap();
        let utc = Timestamp::parse("2024-01-01T09:30:00.250Z").unwrap();
        assert_eq!(ts.as_datetime(), utc.as_datetime());
    }

    #[test]
    fn offsetless_values_are_local_time() {
        let ts = Timestamp::parse("2024-01-01T09:00:00").unwrap();
        let local = ts.as_datetime().with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-01 09:00:00");

        assert!(Timestamp::parse("2024-01-01T09:00").is_ok());
        assert!(Timestamp::parse("2024-01-01T09:00:00.123").is_ok());
    }

    #[test]
    fn now_survives_a_round_trip() {
        let now = Timestamp::now();
        let back = Timestamp::parse(&now.to_string()).unwrap();
        assert_eq!(now, back);
    }

    #[test]
    fn rejects_dates_and_garbage() {
        assert!(Timestamp::parse("2024-01-01").is_err());
        assert!(Timestamp::parse("yesterday").is_err());
        assert!(Timestamp::parse("2024-13-01T00:00:00").is_err());
    }

    #[test]
    fn orders_chronologically() {
        let earlier = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        let later = Timestamp::parse("2024-01-01T00:00:00.001Z").unwrap();
        assert!(earlier < later);

        let tokyo = Timestamp::parse("2024-01-01T08:00:00+09:00").unwrap();
        assert!(tokyo < earlier);
    }
}
