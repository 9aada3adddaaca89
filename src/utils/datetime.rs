use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
};
use std::fmt::Display;

use crate::error::{ApiError, ApiResult};

/// Human-readable wall-clock pattern, seconds precision, no offset
pub const HUMAN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ISO_BASE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

/// Tried in order after [`canonicalize`]. `%#z` takes `±HH`, `±HHMM` and `±HH:MM`.
const AWARE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A caller-supplied datetime, before any timezone has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDatetime {
    /// Wall-clock values with no offset information
    Naive(NaiveDateTime),
    /// An unambiguous instant carrying its own UTC offset
    Aware(DateTime<FixedOffset>),
}

/// Replaces the first space with the ISO `T` separator.
pub fn normalize_separator(input: &str) -> String {
    input.replacen(' ', "T", 1)
}

/// Parses an ISO-8601 datetime such as `2024-01-15T12:00:00`,
/// `2024-01-15T12:00:00.250+05:30` or a bare `2024-01-15`.
///
/// Accepted shapes:
/// - date `YYYY-MM-DD` (year 0001 or later), alone meaning midnight
/// - any single ASCII character between date and time
/// - time `HH`, `HH:MM`, `HH:MM:SS` or `HH:MM:SS.f` (`.` or `,`; digits past nine are ignored)
/// - offset `Z`, `±HH`, `±HHMM` or `±HH:MM`
pub fn parse_iso_datetime(input: &str) -> ApiResult<ParsedDatetime> {
    if !has_iso_date_prefix(input) {
        return Err(ApiError::InvalidDatetime);
    }

    let parsed = if input.len() == DATE_LEN {
        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(ParsedDatetime::Naive)
    } else {
        canonicalize(input).and_then(|canonical| parse_canonical(&canonical))
    };

    parsed
        .filter(|dt| dt.year() >= 1)
        .ok_or(ApiError::InvalidDatetime)
}

impl ParsedDatetime {
    /// Calendar year of the literal wall-clock values
    pub fn year(&self) -> i32 {
        match self {
            ParsedDatetime::Naive(dt) => dt.year(),
            ParsedDatetime::Aware(dt) => dt.year(),
        }
    }
}

/// Renders an aware datetime the way `isoformat` consumers expect:
/// microseconds only when non-zero, `+00:00` rather than `Z`, and offset
/// seconds only when the offset is not a whole minute.
pub fn to_iso_string<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut rendered = dt.format(ISO_BASE_FORMAT).to_string();

    // Leap seconds are carried in nanoseconds >= 1e9
    let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
    if micros != 0 {
        rendered.push_str(&format!(".{:06}", micros));
    }

    let offset_seconds = dt.offset().fix().local_minus_utc();
    let offset_format = if offset_seconds % 60 != 0 { "%::z" } else { "%:z" };
    rendered.push_str(&dt.format(offset_format).to_string());
    rendered
}

/// Formats using [`HUMAN_FORMAT`]
pub fn to_human_string<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format(HUMAN_FORMAT).to_string()
}

/// Unix epoch seconds, truncated toward zero.
pub fn epoch_seconds<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    let seconds = dt.timestamp();
    if seconds < 0 && dt.timestamp_subsec_nanos() > 0 {
        seconds + 1
    } else {
        seconds
    }
}

fn parse_canonical(canonical: &str) -> Option<ParsedDatetime> {
    AWARE_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(canonical, format).ok())
        .map(ParsedDatetime::Aware)
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(canonical, format).ok())
                .map(ParsedDatetime::Naive)
        })
}

/// Rewrites `input` into the shape the chrono formats expect: `T` as the
/// separator, `.` before the fraction, `+00:00` for `Z`, and explicit
/// minutes after a lone hour.
fn canonicalize(input: &str) -> Option<String> {
    if !input.as_bytes().get(DATE_LEN)?.is_ascii() {
        return None;
    }
    let date = &input[..DATE_LEN];
    let time = &input[DATE_LEN + 1..];
    if !has_two_digit_clock_fields(time) {
        return None;
    }

    let mut time = time.replacen(',', ".", 1);
    if time.ends_with(['Z', 'z']) {
        time.pop();
        time.push_str("+00:00");
    }
    if time.len() == 2 || matches!(time.as_bytes().get(2), Some(b'+' | b'-')) {
        time.insert_str(2, ":00");
    }

    Some(format!("{}T{}", date, time))
}

/// `YYYY-MM-DD` with exactly four year digits. chrono's `%Y`, `%m` and `%d`
/// also take signs, extra or missing digits.
fn has_iso_date_prefix(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= DATE_LEN
        && bytes[..DATE_LEN].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Hour, minute and second must each be two digits; chrono accepts one.
fn has_two_digit_clock_fields(time: &str) -> bool {
    let clock_len = time
        .find(['.', ',', 'Z', 'z', '+', '-'])
        .unwrap_or(time.len());
    let clock = &time[..clock_len];

    !clock.is_empty()
        && clock
            .split(':')
            .all(|field| field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()))
}
