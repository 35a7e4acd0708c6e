//! Outage types.
//!
//! Timestamps are kept as the strings the upstream service sent. The
//! upstream format (`YYYY-MM-DDTHH:MM:SS.sssZ`) sorts lexicographically in
//! chronological order, which the site filter relies on. Parsing into
//! [`DateTime<Utc>`] happens only when a caller needs instants.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::site::Device;
use crate::error::CoreError;

/// Parses an upstream timestamp into a UTC instant.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if `value` is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

// ============================================================================
// Raw Outage
// ============================================================================

/// An outage as reported by `GET /outages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outage {
    /// Identifier of the device that was down.
    pub id: String,
    /// Start of the outage (ISO-8601).
    pub begin: String,
    /// End of the outage (ISO-8601).
    pub end: String,
}

impl Outage {
    /// Creates a new outage.
    pub fn new(id: impl Into<String>, begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            begin: begin.into(),
            end: end.into(),
        }
    }
}

// ============================================================================
// Site Outage
// ============================================================================

/// An outage enriched with the display name of the site device it affected.
///
/// This is the record submitted to `POST /site-outages/{siteId}` and the
/// row source for the rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOutage {
    /// Identifier of the device that was down.
    pub id: String,
    /// Display name of the device.
    pub name: String,
    /// Start of the outage (ISO-8601).
    pub begin: String,
    /// End of the outage (ISO-8601).
    pub end: String,
}

impl SiteOutage {
    /// Joins an outage with the device it refers to.
    pub fn from_outage(outage: &Outage, device: &Device) -> Self {
        Self {
            id: outage.id.clone(),
            name: device.name.clone(),
            begin: outage.begin.clone(),
            end: outage.end.clone(),
        }
    }

    /// Parsed begin instant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] if `begin` is malformed.
    pub fn begin_at(&self) -> Result<DateTime<Utc>, CoreError> {
        parse_timestamp(&self.begin)
    }

    /// Parsed end instant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] if `end` is malformed.
    pub fn end_at(&self) -> Result<DateTime<Utc>, CoreError> {
        parse_timestamp(&self.end)
    }

    /// Length of the outage. Negative when `end` precedes `begin`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] if either timestamp is malformed.
    pub fn duration(&self) -> Result<TimeDelta, CoreError> {
        Ok(self.end_at()? - self.begin_at()?)
    }
}
