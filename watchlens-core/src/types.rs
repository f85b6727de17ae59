//! Core domain types for watchlens
//!
//! These types represent one entry of a watch-history export after
//! normalization. The aggregate types produced from them live next to the
//! aggregators in [`crate::analytics`].
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Watch record** | One entry of a viewing-history export: a title, optionally a time and channel |
//! | **Entity** | The named source of a record (a channel); only the first listed one is ranked |
//! | **Civil time** | An instant rendered in the zone chosen by [`TimeZonePolicy`] |

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ============================================
// Watch records
// ============================================

/// One historical watch event.
///
/// `title` is guaranteed non-empty by the normalizer. Every other field is
/// optional in the export and stays optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchRecord {
    /// Title as it appears in the export (e.g. "Watched Rust in 100 Seconds")
    pub title: String,
    /// ISO-8601 timestamp, verbatim from the export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Associated entities; the primary one is listed first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtitles: Vec<EntityReference>,
}

impl WatchRecord {
    /// Create a record with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: None,
            subtitles: Vec::new(),
        }
    }

    /// Attach a timestamp.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Append an entity reference.
    pub fn with_entity(mut self, name: impl Into<String>) -> Self {
        self.subtitles.push(EntityReference {
            name: name.into(),
            url: None,
        });
        self
    }

    /// When this record was watched, if the timestamp is present and parseable.
    pub fn watched_at(&self) -> Option<DateTime<Utc>> {
        self.time.as_deref().and_then(parse_timestamp)
    }

    /// Name of the primary entity (the first reference).
    pub fn primary_entity(&self) -> Option<&str> {
        self.subtitles.first().map(|entity| entity.name.as_str())
    }
}

/// A named source attached to a watch record, usually a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Parse an export timestamp.
///
/// Accepts RFC 3339 (`2024-03-15T14:22:31.123Z`), a naive date-time read as
/// UTC, or a bare date read as midnight UTC. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ============================================
// Time zone policy
// ============================================

/// Zone used to turn instants into calendar months and hours of day.
///
/// The default is UTC so results do not depend on the machine running the
/// pipeline. `Local` must be chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeZonePolicy {
    #[default]
    Utc,
    Local,
    Fixed(FixedOffset),
}

impl TimeZonePolicy {
    /// Render an instant as civil time under this policy.
    pub fn civil(&self, ts: DateTime<Utc>) -> NaiveDateTime {
        match self {
            TimeZonePolicy::Utc => ts.naive_utc(),
            TimeZonePolicy::Local => ts.with_timezone(&Local).naive_local(),
            TimeZonePolicy::Fixed(offset) => ts.with_timezone(offset).naive_local(),
        }
    }
}

impl FromStr for TimeZonePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" => return Ok(TimeZonePolicy::Utc),
            "local" => return Ok(TimeZonePolicy::Local),
            _ => {}
        }

        let invalid = || {
            Error::Config(format!(
                "invalid timezone '{}': use \"utc\", \"local\" or an offset like \"+05:30\"",
                s
            ))
        };

        let (sign, rest) = match trimmed.chars().next() {
            Some('+') => (1, &trimmed[1..]),
            Some('-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };
        if !rest.chars().all(|c| c.is_ascii_digit() || c == ':') {
            return Err(invalid());
        }
        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => rest.split_at(2),
            None => (rest, "0"),
        };
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(TimeZonePolicy::Fixed)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeZonePolicy {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TimeZonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZonePolicy::Utc => write!(f, "utc"),
            TimeZonePolicy::Local => write!(f, "local"),
            TimeZonePolicy::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}
