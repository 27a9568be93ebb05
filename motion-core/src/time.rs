//! Time utilities: ISO-8601 serialization and timezone-aware display.

use anyhow::Result;
use chrono::{DateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serializer;

/// Parse an IANA zone name like "America/Chicago".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// UTC ISO-8601 with millisecond precision, e.g. `2024-01-15T09:00:00.000Z`.
pub fn to_iso8601(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| anyhow::anyhow!("invalid ISO-8601 instant '{s}': {e}"))?;
    Ok(dt.with_timezone(&Utc))
}

/// Serde helper for `Option<DateTime<Utc>>` fields sent to the API.
pub fn serialize_iso8601_opt<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_str(&to_iso8601(*dt)),
        None => serializer.serialize_none(),
    }
}

/// Calendar date in the display timezone.
pub fn format_local_date(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Start of the current local day, as a UTC instant.
pub fn local_midnight_utc(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local_date = now.with_timezone(&tz).date_naive();
    let midnight = local_date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
