//! Textual forms of song and playlist durations
//!
//! Durations are stored as `H:MM:SS` (hours unbounded, minutes and seconds
//! zero-padded). Users type song lengths as `MM:SS`, which is parsed
//! separately into the same representation.

use crate::error::FormatError;
use chrono::TimeDelta;

const STORED_LAYOUT: &str = "H:MM:SS";
const ENTRY_LAYOUT: &str = "MM:SS";

/// Render a duration as `H:MM:SS`
///
/// Sub-second precision is dropped.
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Parse the stored `H:MM:SS` form
pub fn parse_duration(text: &str) -> Result<TimeDelta, FormatError> {
    let invalid = || FormatError::new(text, STORED_LAYOUT);

    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours = numeric_field(hours, 1, usize::MAX).ok_or_else(invalid)?;
    let minutes = sexagesimal_field(minutes, 2).ok_or_else(invalid)?;
    let seconds = sexagesimal_field(seconds, 2).ok_or_else(invalid)?;

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(invalid)
}

/// Parse a user-entered `MM:SS` song length
///
/// Each field takes one or two digits in `0..=59`.
pub fn parse_minutes_seconds(text: &str) -> Result<TimeDelta, FormatError> {
    let invalid = || FormatError::new(text, ENTRY_LAYOUT);

    let (minutes, seconds) = text.trim().split_once(':').ok_or_else(invalid)?;
    let minutes = sexagesimal_field_loose(minutes).ok_or_else(invalid)?;
    let seconds = sexagesimal_field_loose(seconds).ok_or_else(invalid)?;

    Ok(TimeDelta::seconds(minutes * 60 + seconds))
}

/// Digits only, with a length in `min_len..=max_len`
fn numeric_field(field: &str, min_len: usize, max_len: usize) -> Option<i64> {
    if field.len() < min_len || field.len() > max_len {
        return None;
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Exactly `width` digits, below 60
fn sexagesimal_field(field: &str, width: usize) -> Option<i64> {
    numeric_field(field, width, width).filter(|v| *v < 60)
}

/// One or two digits, below 60
fn sexagesimal_field_loose(field: &str) -> Option<i64> {
    numeric_field(field, 1, 2).filter(|v| *v < 60)
}
