//! UTC timestamps with millisecond precision.
//!
//! Every date that enters the system (batch `updateDate`, query bounds) is
//! normalized to UTC and truncated to whole milliseconds, so equality
//! comparisons between stored and incoming dates are exact. On the wire a
//! timestamp is always rendered as `YYYY-MM-DDTHH:MM:SS.mmmZ`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A point in time, UTC, millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Parse an ISO-8601 / RFC 3339 string. A missing offset is read as UTC.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self::from(naive.and_utc()))
            .map_err(|_| AppError::validation(format!("Invalid date: {s}")))
    }

    /// Return the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Subtract `rhs`, clamping to the earliest representable instant.
    pub fn saturating_sub(self, rhs: Duration) -> Self {
        Self(self.0.checked_sub_signed(rhs).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(3))
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|e| serde::de::Error::custom(e.message))
    }
}
