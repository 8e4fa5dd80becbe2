//! Timestamp type used for genesis and vesting schedules.
//!
//! Timestamps are Unix epoch seconds (UTC). Nothing in this crate reads the
//! wall clock: every timestamp comes from configuration.

use crate::error::TypesError;
use chrono::{DateTime, Months, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// Parse an RFC 3339 time such as `2022-04-13T00:00:00Z`.
    pub fn parse_rfc3339(s: &str) -> Result<Self, TypesError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.timestamp()))
            .map_err(|e| TypesError::InvalidTimestamp {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    pub fn add_secs(&self, secs: u64) -> Result<Self, TypesError> {
        i64::try_from(secs)
            .ok()
            .and_then(|s| self.0.checked_add(s))
            .map(Self)
            .ok_or_else(|| TypesError::TimestampOverflow(format!("{secs}s to {self}")))
    }

    /// Add calendar months. Days past the end of the target month clamp to
    /// its last day.
    pub fn add_months(&self, months: u32) -> Result<Self, TypesError> {
        self.to_datetime()
            .and_then(|dt| dt.checked_add_months(Months::new(months)))
            .map(|dt| Self(dt.timestamp()))
            .ok_or_else(|| TypesError::TimestampOverflow(format!("{months} months to {self}")))
    }

    fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// RFC 3339 rendering, falling back to raw seconds when out of range.
    pub fn to_rfc3339(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => format!("{}s", self.0),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}
