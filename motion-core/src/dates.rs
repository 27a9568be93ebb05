//! Relative date phrases: "today", "tomorrow", "in 3 days", "next friday".
//!
//! Anything else is tried against a handful of absolute formats. `None` means the
//! phrase could not be read; callers log it and leave the date out. Weekdays and dates
//! without an offset are read in the user's timezone.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

static IN_DAYS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"in (\d+) days?").expect("invalid in-days regex"));
static NEXT_WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"next (monday|tuesday|wednesday|thursday|friday|saturday|sunday)")
        .expect("invalid next-weekday regex")
});

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Resolve `text` relative to `now` as seen in `tz`. Results are absolute UTC instants.
pub fn parse_natural_date(text: &str, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
    let lower = text.trim().to_lowercase();

    match lower.as_str() {
        "today" => return Some(now),
        "tomorrow" => return Some(now + Duration::days(1)),
        _ => {}
    }

    if let Some(caps) = IN_DAYS_RE.captures(&lower) {
        let days: i64 = caps[1].parse().ok()?;
        return now.checked_add_signed(Duration::try_days(days)?);
    }

    if let Some(caps) = NEXT_WEEKDAY_RE.captures(&lower) {
        let target: Weekday = caps[1].parse().ok()?;
        let today = now.with_timezone(&tz).weekday();
        return Some(now + Duration::days(days_until_next(today, target)));
    }

    parse_absolute(text.trim(), tz)
}

/// Days until the next `target` strictly after `today` (1..=7).
pub fn days_until_next(today: Weekday, target: Weekday) -> i64 {
    let ahead = (target.num_days_from_sunday() + 7 - today.num_days_from_sunday()) % 7;
    if ahead == 0 { 7 } else { ahead as i64 }
}

fn parse_absolute(text: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(text, fmt) {
            return local_to_utc(ndt, tz);
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return local_to_utc(d.and_time(NaiveTime::MIN), tz);
        }
    }
    None
}

/// Earliest instant for a wall-clock time; `None` inside a DST gap.
fn local_to_utc(ndt: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
