//! Millisecond timestamps used by scheduling fields.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Input format of the schedule editor (`datetime-local`).
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A point in time as milliseconds since the Unix epoch.
///
/// This is the wire representation of activity start and end times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Parse editor input.
    ///
    /// Accepts RFC 3339 (`2026-03-01T10:00:00+08:00`) or the editor's
    /// `YYYY-MM-DDTHH:MM`, which is read in local time.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.timestamp_millis()));
        }

        let naive = NaiveDateTime::parse_from_str(s, INPUT_FORMAT).map_err(|e| {
            InvalidInputError::Other {
                message: format!("invalid time '{}': {}", s, e),
            }
        })?;

        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| Self(dt.timestamp_millis()))
            .ok_or_else(|| {
                InvalidInputError::Other {
                    message: format!("time '{}' does not exist in the local time zone", s),
                }
                .into()
            })
    }

    /// Format for display in local time.
    pub fn to_local_string(&self) -> String {
        match Local.timestamp_millis_opt(self.0).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => self.0.to_string(),
        }
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_local_string())
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
