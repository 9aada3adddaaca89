//! Request and response bodies for the HTTP API.
//!
//! Both response types carry the ISO-8601 rendering twice, under `iso` and
//! `ISO`. Older clients read the upper-case key, so the two are always
//! populated from the same value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/convert`.
///
/// Fields are optional and untyped at the schema level so that a missing
/// field is reported by name before any value is type-checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// Datetime to convert, e.g. `2024-01-15 12:00:00`
    pub dt: Option<Value>,
    /// Source IANA timezone identifier
    pub from: Option<Value>,
    /// Destination IANA timezone identifier
    pub to: Option<Value>,
}

/// A [`ConvertRequest`] whose required fields have all been checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionQuery<'a> {
    /// Raw datetime string as supplied
    pub dt: &'a str,
    /// Source timezone identifier
    pub from: &'a str,
    /// Destination timezone identifier
    pub to: &'a str,
}

/// Body returned by `GET /api/current/{tz}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTimeResponse {
    /// Identifier exactly as requested
    pub timezone: String,
    /// ISO-8601 rendering of the current instant
    pub iso: String,
    /// Same value as `iso`
    #[serde(rename = "ISO")]
    pub iso_upper: String,
    /// `YYYY-MM-DD HH:MM:SS` wall-clock time
    pub time: String,
    /// Unix epoch seconds, truncated
    pub epoch: i64,
}

/// Body returned by `POST /api/convert`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    /// The `dt` field as supplied, before normalization
    pub input: String,
    /// Source timezone identifier
    pub from: String,
    /// Destination timezone identifier
    pub to: String,
    /// ISO-8601 rendering in the destination timezone
    pub iso: String,
    /// Same value as `iso`
    #[serde(rename = "ISO")]
    pub iso_upper: String,
    /// Unix epoch seconds, truncated
    pub epoch: i64,
}
