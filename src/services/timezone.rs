use std::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ApiError, ApiResult};
use crate::models::{ConversionQuery, ConvertResponse, CurrentTimeResponse};
use crate::utils::datetime::{
    epoch_seconds, normalize_separator, parse_iso_datetime, to_human_string, to_iso_string,
    ParsedDatetime,
};

/// Source of the current instant
pub type Clock = fn() -> DateTime<Utc>;

/// Answers current-time queries against the compiled-in IANA database.
///
/// The clock is injectable so that tests can pin "now".
#[derive(Debug, Clone, Copy)]
pub struct TimezoneService {
    clock: Clock,
}

impl TimezoneService {
    /// Service reading the system clock
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Service reading the given clock instead of the system one
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// The current instant expressed in `timezone_name`
    pub fn now_in(&self, timezone_name: &str) -> ApiResult<DateTime<Tz>> {
        let timezone = resolve_timezone(timezone_name)?;
        Ok((self.clock)().with_timezone(&timezone))
    }

    /// Builds the `GET /api/current/{tz}` payload
    pub fn current_time(&self, timezone_name: &str) -> ApiResult<CurrentTimeResponse> {
        let now = self.now_in(timezone_name)?;
        let iso = to_iso_string(&now);

        Ok(CurrentTimeResponse {
            timezone: timezone_name.to_string(),
            iso_upper: iso.clone(),
            iso,
            time: to_human_string(&now),
            epoch: epoch_seconds(&now),
        })
    }
}

impl Default for TimezoneService {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks up an IANA identifier. Matching is exact and case-sensitive.
pub fn resolve_timezone(timezone_name: &str) -> ApiResult<Tz> {
    Tz::from_str(timezone_name).map_err(|_| ApiError::unknown_timezone(timezone_name))
}

/// Parses `raw` and expresses it in `source_name`.
///
/// The string is parsed before the zone is looked up, so a malformed
/// datetime is reported even when the zone is also unknown. Naive input is
/// read as wall-clock time in the source zone; input carrying an offset is
/// converted into the source zone.
pub fn parse_in_zone(raw: &str, source_name: &str) -> ApiResult<DateTime<Tz>> {
    let parsed = parse_iso_datetime(&normalize_separator(raw))?;
    let source = resolve_timezone(source_name)?;

    match parsed {
        ParsedDatetime::Naive(naive) => attach_zone(&source, &naive),
        ParsedDatetime::Aware(aware) => Ok(aware.with_timezone(&source)),
    }
}

/// Converts `query.dt` from `query.from` into `query.to`.
pub fn convert_time(query: &ConversionQuery<'_>) -> ApiResult<ConvertResponse> {
    let source_time = parse_in_zone(query.dt, query.from)?;
    let target = resolve_timezone(query.to)?;

    let converted = source_time.with_timezone(&target);
    let iso = to_iso_string(&converted);

    Ok(ConvertResponse {
        input: query.dt.to_string(),
        from: query.from.to_string(),
        to: query.to.to_string(),
        iso_upper: iso.clone(),
        iso,
        epoch: epoch_seconds(&converted),
    })
}

/// Pins wall-clock values to a zone.
///
/// Repeated local times (DST fall-back) take the earlier instant. Skipped
/// local times (DST spring-forward) are read with the offset in force before
/// the transition, which lands them after the gap.
fn attach_zone(timezone: &Tz, naive: &NaiveDateTime) -> ApiResult<DateTime<Tz>> {
    match timezone.from_local_datetime(naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            let before_gap = naive
                .checked_sub_signed(Duration::days(1))
                .ok_or(ApiError::InvalidDatetime)?;
            let offset = timezone.offset_from_utc_datetime(&before_gap).fix();
            let utc = naive
                .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
                .ok_or(ApiError::InvalidDatetime)?;
            Ok(timezone.from_utc_datetime(&utc))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_clock() -> DateTime<Utc> {
        // 2024-01-15T12:00:00.750Z
        Utc.timestamp_opt(1_705_320_000, 750_000_000).unwrap()
    }

    fn query<'a>(dt: &'a str, from: &'a str, to: &'a str) -> ConversionQuery<'a> {
        ConversionQuery { dt, from, to }
    }

    #[test]
    fn test_resolve_known_and_unknown_zones() {
        assert_eq!(resolve_timezone("America/New_York").unwrap(), chrono_tz::America::New_York);
        assert_eq!(resolve_timezone("UTC").unwrap(), chrono_tz::UTC);
        assert_eq!(
            resolve_timezone("Fake/Zone"),
            Err(ApiError::unknown_timezone("Fake/Zone"))
        );
        assert!(resolve_timezone("").is_err());
        assert!(resolve_timezone("america/new_york").is_err());
    }

    #[test]
    fn test_current_time_with_fixed_clock() {
        let service = TimezoneService::with_clock(fixed_clock);
        let response = service.current_time("Asia/Tokyo").unwrap();

        assert_eq!(response.timezone, "Asia/Tokyo");
        assert_eq!(response.iso, "2024-01-15T21:00:00.750000+09:00");
        assert_eq!(response.iso, response.iso_upper);
        assert_eq!(response.time, "2024-01-15 21:00:00");
        assert_eq!(response.epoch, 1_705_320_000);
    }

    #[test]
    fn test_current_time_unknown_zone() {
        let service = TimezoneService::with_clock(fixed_clock);
        let err = service.current_time("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err.to_string(), "Unknown timezone: Mars/Olympus_Mons");
    }

    #[test]
    fn test_naive_input_is_local_to_source() {
        let dt = parse_in_zone("2024-07-01 09:30:00", "Europe/Paris").unwrap();
        assert_eq!(to_iso_string(&dt), "2024-07-01T09:30:00+02:00");
    }

    #[test]
    fn test_aware_input_is_reexpressed_in_source() {
        let dt = parse_in_zone("2024-01-15T12:00:00+00:00", "Asia/Kolkata").unwrap();
        assert_eq!(to_iso_string(&dt), "2024-01-15T17:30:00+05:30");
        assert_eq!(dt.timestamp(), 1_705_320_000);
    }

    #[test]
    fn test_parse_failure_precedes_source_lookup() {
        assert_eq!(
            parse_in_zone("not-a-date", "Fake/Zone"),
            Err(ApiError::InvalidDatetime)
        );
        assert_eq!(
            parse_in_zone("2024-01-15 12:00:00", "Fake/Zone"),
            Err(ApiError::unknown_timezone("Fake/Zone"))
        );
    }

    #[test]
    fn test_ambiguous_local_time_takes_earlier_instant() {
        // 01:30 happens twice in New York on 2024-11-03
        let dt = parse_in_zone("2024-11-03 01:30:00", "America/New_York").unwrap();
        assert_eq!(to_iso_string(&dt), "2024-11-03T01:30:00-04:00");
    }

    #[test]
    fn test_skipped_local_time_lands_after_gap() {
        // 02:30 does not exist in New York on 2024-03-10
        let dt = parse_in_zone("2024-03-10 02:30:00", "America/New_York").unwrap();
        assert_eq!(to_iso_string(&dt), "2024-03-10T03:30:00-04:00");
        assert_eq!(dt.with_timezone(&Utc).to_rfc3339(), "2024-03-10T07:30:00+00:00");
    }

    #[test]
    fn test_convert_utc_noon_to_new_york() {
        let response = convert_time(&query("2024-01-15 12:00:00", "UTC", "America/New_York")).unwrap();

        assert_eq!(response.input, "2024-01-15 12:00:00");
        assert_eq!(response.from, "UTC");
        assert_eq!(response.to, "America/New_York");
        assert_eq!(response.iso, "2024-01-15T07:00:00-05:00");
        assert_eq!(response.iso_upper, response.iso);
        assert_eq!(response.epoch, 1_705_320_000);
    }

    #[test]
    fn test_convert_reports_destination_last() {
        assert_eq!(
            convert_time(&query("2024-01-15 12:00:00", "Bad/Source", "Bad/Target")),
            Err(ApiError::unknown_timezone("Bad/Source"))
        );
        assert_eq!(
            convert_time(&query("2024-01-15 12:00:00", "UTC", "Bad/Target")),
            Err(ApiError::unknown_timezone("Bad/Target"))
        );
    }

    #[test]
    fn test_round_trip_preserves_epoch() {
        let there = convert_time(&query("2024-06-30 23:15:42", "Australia/Sydney", "America/Los_Angeles")).unwrap();
        let back = convert_time(&query(&there.iso, "America/Los_Angeles", "Australia/Sydney")).unwrap();

        assert_eq!(there.epoch, back.epoch);
        assert_eq!(back.iso, "2024-06-30T23:15:42+10:00");
    }
}
