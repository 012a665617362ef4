//! Loose date parsing for record dates.
//!
//! Payload publication dates arrive in whatever shape the submitter typed.
//! They are matched against a small ladder of formats, year-led forms
//! first, and every component the source omits is filled from a fixed
//! default instant (1970-01-01T00:00:00) so output stays deterministic.
//! Header datestamps are machine-generated and get no defaults at all.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::error::{HarvesterError, Result};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static YEAR_LED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:[-/](\d{1,2})(?:[-/](\d{1,2}))?)?$").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MONTH_LED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[-/](\d{1,2})[-/](\d{4})$").expect("valid regex"));

/// Month-name formats tried after the numeric ladder.
const NAMED_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

/// Timestamp formats without a UTC offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a payload publication date into ISO 8601.
///
/// Empty input yields the default instant itself. A source-supplied UTC
/// offset is kept; everything else renders naive.
///
/// # Examples
/// ```
/// use wayne_harvester::dates::parse_date_created;
///
/// assert_eq!(parse_date_created("2020-05-01").unwrap(), "2020-05-01T00:00:00");
/// assert_eq!(parse_date_created("").unwrap(), "1970-01-01T00:00:00");
/// ```
pub fn parse_date_created(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(render_naive(default_instant()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.to_rfc3339());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(render_naive(dt));
        }
    }

    if let Some(caps) = YEAR_LED.captures(value) {
        // Month and day fall back to the default instant's components.
        let year: i32 = caps[1].parse().unwrap_or(1970);
        let month: u32 = caps.get(2).map_or(1, |m| m.as_str().parse().unwrap_or(1));
        let day: u32 = caps.get(3).map_or(1, |d| d.as_str().parse().unwrap_or(1));
        return date_or_unparsable(year, month, day, value);
    }

    if let Some(caps) = MONTH_LED.captures(value) {
        let month: u32 = caps[1].parse().unwrap_or(1);
        let day: u32 = caps[2].parse().unwrap_or(1);
        let year: i32 = caps[3].parse().unwrap_or(1970);
        return date_or_unparsable(year, month, day, value);
    }

    for format in NAMED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(render_naive(date.and_time(NaiveTime::MIN)));
        }
    }

    Err(HarvesterError::UnparsableDate {
        value: value.to_string(),
    })
}

/// Parse an OAI header datestamp into ISO 8601.
///
/// Accepts a full timestamp (offset kept and rendered, so `...T00:00:00Z`
/// becomes `...T00:00:00+00:00`) or a bare date (rendered as naive
/// midnight). Anything else is an error; datestamps get no defaults.
pub fn parse_datestamp(value: &str) -> Result<String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.to_rfc3339());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(render_naive(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(render_naive(date.and_time(NaiveTime::MIN)));
    }

    Err(HarvesterError::UnparsableDate {
        value: value.to_string(),
    })
}

/// 1970-01-01T00:00:00, the instant that fills omitted components.
fn default_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

fn date_or_unparsable(year: i32, month: u32, day: u32, value: &str) -> Result<String> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| render_naive(date.and_time(NaiveTime::MIN)))
        .ok_or_else(|| HarvesterError::UnparsableDate {
            value: value.to_string(),
        })
}

fn render_naive(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}
