//! # Temporal Parsing — ISO-8601 Dates and Offset Datetimes
//!
//! Parses the two temporal shapes the conversion layer accepts:
//!
//! - **Datetime**: `YYYY-MM-DD[T| ]HH:MM:SS[.fraction]<offset>` where the
//!   offset is `Z`, `±HH:MM`, `±HHMM` or `±HH`. An offset is mandatory.
//!   The result is the instant normalized to UTC together with the offset
//!   (in seconds east of UTC) used in the source text.
//! - **Date**: `YYYY-MM-DD`, no time component.
//!
//! Failures report a [`TemporalError`] reason. The shape is checked first
//! (`invalid_format`), then the calendar date (`invalid_date`), then the
//! time of day (`invalid_time`), and finally the presence of an offset
//! (`missing_offset`).
//!
//! The fixed-width shape is checked here; `chrono` reads the date and time
//! fields and validates them. The offset is read locally because
//! `chrono`'s RFC 3339 parser rejects the basic form `+0100`, which
//! request payloads commonly carry.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Timelike, Utc,
};

use crate::error::TemporalError;

const DATE_SHAPE: &str = "dddd-dd-dd";
const TIME_SHAPE: &str = "dd:dd:dd";

/// Parse an ISO-8601 datetime with a mandatory offset.
///
/// Returns the instant in UTC and the source offset in seconds.
///
/// # Errors
///
/// Returns the [`TemporalError`] reason describing the first problem found.
pub fn parse_datetime(s: &str) -> Result<(DateTime<Utc>, i32), TemporalError> {
    let date_text = s
        .get(..DATE_SHAPE.len())
        .filter(|d| has_shape(d, DATE_SHAPE))
        .ok_or(TemporalError::InvalidFormat)?;
    let rest = s[DATE_SHAPE.len()..]
        .strip_prefix(['T', ' '])
        .ok_or(TemporalError::InvalidFormat)?;
    let (time_text, offset_text) = rest.split_at(rest.find(['Z', '+', '-']).unwrap_or(rest.len()));
    if !is_time_of_day(time_text) {
        return Err(TemporalError::InvalidFormat);
    }
    let offset = parse_offset(offset_text)?;

    let date = calendar_date(date_text)?;
    let time = NaiveTime::parse_from_str(&time_text.replacen(',', ".", 1), "%H:%M:%S%.f")
        .ok()
        // Leap seconds are not accepted.
        .filter(|t| t.nanosecond() < 1_000_000_000)
        .ok_or(TemporalError::InvalidTime)?;
    let offset = offset.ok_or(TemporalError::MissingOffset)?;

    let zone = FixedOffset::east_opt(offset).ok_or(TemporalError::InvalidFormat)?;
    let local = zone
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(TemporalError::InvalidFormat)?;

    Ok((local.with_timezone(&Utc), offset))
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `InvalidFormat` for anything not shaped like a date and
/// `InvalidDate` for a well-formed but nonexistent date.
pub fn parse_date(s: &str) -> Result<NaiveDate, TemporalError> {
    if !has_shape(s, DATE_SHAPE) {
        return Err(TemporalError::InvalidFormat);
    }
    calendar_date(s)
}

/// Render a UTC instant as RFC 3339 with the `Z` designator.
///
/// Sub-second digits are emitted only when present, so the output parses
/// back to the same instant.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Render a UTC instant in the wall-clock time of `offset_secs`.
///
/// Falls back to the `Z` form when the offset is out of range.
pub fn format_datetime_at_offset(dt: &DateTime<Utc>, offset_secs: i32) -> String {
    match FixedOffset::east_opt(offset_secs) {
        Some(zone) if offset_secs != 0 => dt
            .with_timezone(&zone)
            .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        _ => format_datetime(dt),
    }
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `d` in `shape` stands for an ASCII digit, anything else for itself.
fn has_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

/// `HH:MM:SS` with an optional `.` or `,` fraction of at least one digit.
fn is_time_of_day(text: &str) -> bool {
    let Some(head) = text.get(..TIME_SHAPE.len()) else {
        return false;
    };
    if !has_shape(head, TIME_SHAPE) {
        return false;
    }
    match text[TIME_SHAPE.len()..].strip_prefix(['.', ',']) {
        None => text.len() == TIME_SHAPE.len(),
        Some(fraction) => !fraction.is_empty() && fraction.bytes().all(|c| c.is_ascii_digit()),
    }
}

/// Text already has the date shape, so any `chrono` failure is a
/// nonexistent date.
fn calendar_date(text: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| TemporalError::InvalidDate)
}

/// Parse the trailing offset. `Ok(None)` means no offset was given.
fn parse_offset(text: &str) -> Result<Option<i32>, TemporalError> {
    let (sign, body) = match text.as_bytes().first() {
        None => return Ok(None),
        Some(b'Z') if text.len() == 1 => return Ok(Some(0)),
        Some(b'+') => (1, &text[1..]),
        Some(b'-') => (-1, &text[1..]),
        Some(_) => return Err(TemporalError::InvalidFormat),
    };

    let (hours, minutes) = match body.len() {
        2 => (Some(body), Some("00")),
        4 => (body.get(..2), body.get(2..)),
        5 => match body.split_once(':') {
            Some((h, m)) => (Some(h), Some(m)),
            None => (None, None),
        },
        _ => (None, None),
    };
    let (Some(hours), Some(minutes)) = (hours.and_then(two_digits), minutes.and_then(two_digits))
    else {
        return Err(TemporalError::InvalidFormat);
    };
    if hours > 23 || minutes > 59 {
        return Err(TemporalError::InvalidFormat);
    }
    // "-00:00" denotes an unknown local offset in RFC 3339.
    if sign < 0 && hours == 0 && minutes == 0 {
        return Err(TemporalError::InvalidFormat);
    }

    Ok(Some(sign * (hours * 3600 + minutes * 60)))
}

fn two_digits(text: &str) -> Option<i32> {
    if has_shape(text, "dd") {
        text.parse().ok()
    } else {
        None
    }
}
