/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Lenient type coercion for typed hot columns.
//!
//! Each coercer returns `Option<T>` and, on failure, pushes a human-readable
//! diagnostic onto a [`RowErrors`] accumulator. Failures never cross the row
//! boundary as `Err`: the affected column goes null and the row is still
//! emitted. The diagnostic wording is stable; downstream users filter and
//! group on it.
//!
//! Empty values are not failures. An absent or empty field yields `None`
//! with no diagnostic.

use chrono::NaiveDate;
use fixscan_core::error::StructuralError;

/// Accumulator for per-row diagnostics.
///
/// Seeded with the tokenizer's structural error (if any), then extended by
/// coercion failures for each projected typed column. Joined with `"; "`
/// into the `parse_error` output column.
#[derive(Debug, Default)]
pub struct RowErrors {
    errors: Vec<String>,
}

impl RowErrors {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the accumulator with a structural tokenizer error.
    pub fn seed(&mut self, error: Option<StructuralError>) {
        if let Some(e) = error {
            self.errors.push(e.to_string());
        }
    }

    /// Appends one diagnostic.
    pub fn push(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Returns true if no diagnostics were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Joins the diagnostics into the `parse_error` column value, or `None`
    /// when the row is clean.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join("; "))
        }
    }

    /// Consuming variant of [`RowErrors::message`].
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message()
    }

    /// Clears the accumulator for reuse.
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Parses a signed 64-bit integer from the exact byte span.
///
/// Trailing characters are rejected. On failure pushes
/// `Invalid <field>: '<literal>'` and returns `None`.
#[must_use]
pub fn parse_int64(value: &[u8], field: &str, errors: &mut RowErrors) -> Option<i64> {
    if value.is_empty() {
        return None;
    }

    match std::str::from_utf8(value).ok().and_then(|s| s.parse().ok()) {
        Some(v) => Some(v),
        None => {
            errors.push(format!(
                "Invalid {field}: '{}'",
                String::from_utf8_lossy(value)
            ));
            None
        }
    }
}

/// Parses a 64-bit float from the exact byte span.
///
/// Trailing characters are rejected. On failure pushes
/// `Invalid <field>: '<literal>'` and returns `None`.
#[must_use]
pub fn parse_float64(value: &[u8], field: &str, errors: &mut RowErrors) -> Option<f64> {
    if value.is_empty() {
        return None;
    }

    match std::str::from_utf8(value).ok().and_then(|s| s.parse().ok()) {
        Some(v) => Some(v),
        None => {
            errors.push(format!(
                "Invalid {field}: '{}'",
                String::from_utf8_lossy(value)
            ));
            None
        }
    }
}

/// Parses a FIX UTC timestamp into microseconds since the Unix epoch.
///
/// Grammar: `YYYYMMDD-HH:MM:SS` with an optional `.s`/`.ss`/`.sss` fraction,
/// right-padded to milliseconds (so `.1` reads as 100 ms). Bytes after the
/// fractional digits are ignored. On failure pushes
/// `Invalid <field>: '<literal>' (<reason>)` and returns `None`.
#[must_use]
pub fn parse_utc_timestamp_micros(value: &[u8], field: &str, errors: &mut RowErrors) -> Option<i64> {
    if value.is_empty() {
        return None;
    }

    match timestamp_micros(value) {
        Ok(micros) => Some(micros),
        Err(reason) => {
            errors.push(format!(
                "Invalid {field}: '{}' ({reason})",
                String::from_utf8_lossy(value)
            ));
            None
        }
    }
}

fn timestamp_micros(v: &[u8]) -> Result<i64, &'static str> {
    // Minimum: YYYYMMDD-HH:MM:SS
    if v.len() < 17 {
        return Err("too short");
    }

    let year = digits4(v, 0)?;
    let month = digits2(v, 4)?;
    let day = digits2(v, 6)?;

    if !(1900..=2100).contains(&year) {
        return Err("Year out of range");
    }
    if !(1..=12).contains(&month) {
        return Err("Month out of range");
    }
    if !(1..=31).contains(&day) {
        return Err("Day out of range");
    }
    if v[8] != b'-' {
        return Err("Missing date-time separator");
    }

    let hour = digits2(v, 9)?;
    let minute = digits2(v, 12)?;
    let second = digits2(v, 15)?;

    if hour > 23 {
        return Err("Hour out of range");
    }
    if minute > 59 {
        return Err("Minute out of range");
    }
    if second > 59 {
        return Err("Second out of range");
    }
    if v[11] != b':' || v[14] != b':' {
        return Err("Missing time separators");
    }

    // Optional fraction: up to three digits, right-padded to milliseconds.
    let mut millis: u32 = 0;
    if v.len() > 17 && v[17] == b'.' {
        let mut digits = 0;
        let mut i = 18;
        while i < v.len() && i < 21 && v[i].is_ascii_digit() {
            millis = millis * 10 + u32::from(v[i] - b'0');
            digits += 1;
            i += 1;
        }
        while digits < 3 {
            millis *= 10;
            digits += 1;
        }
    }

    let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .ok_or("invalid calendar date")?;
    let datetime = date
        .and_hms_micro_opt(
            u32::from(hour),
            u32::from(minute),
            u32::from(second),
            millis * 1000,
        )
        .ok_or("invalid time of day")?;

    Ok(datetime.and_utc().timestamp_micros())
}

#[inline]
fn digits2(v: &[u8], offset: usize) -> Result<u16, &'static str> {
    let a = v[offset];
    let b = v[offset + 1];
    if !a.is_ascii_digit() || !b.is_ascii_digit() {
        return Err("Invalid digit");
    }
    Ok(u16::from(a - b'0') * 10 + u16::from(b - b'0'))
}

#[inline]
fn digits4(v: &[u8], offset: usize) -> Result<u16, &'static str> {
    Ok(digits2(v, offset)? * 100 + digits2(v, offset + 2)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int64_valid() {
        let mut errors = RowErrors::new();
        assert_eq!(parse_int64(b"12345", "MsgSeqNum", &mut errors), Some(12345));
        assert_eq!(parse_int64(b"-7", "MsgSeqNum", &mut errors), Some(-7));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_int64_invalid_records_diagnostic() {
        let mut errors = RowErrors::new();
        assert_eq!(parse_int64(b"abc", "MsgSeqNum", &mut errors), None);
        assert_eq!(
            errors.into_message().as_deref(),
            Some("Invalid MsgSeqNum: 'abc'")
        );
    }

    #[test]
    fn test_int64_rejects_trailing_characters() {
        let mut errors = RowErrors::new();
        assert_eq!(parse_int64(b"12x", "MsgSeqNum", &mut errors), None);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_int64_empty_is_null_not_error() {
        let mut errors = RowErrors::new();
        assert_eq!(parse_int64(b"", "MsgSeqNum", &mut errors), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_float64_valid() {
        let mut errors = RowErrors::new();
        assert_eq!(parse_float64(b"150.50", "Price", &mut errors), Some(150.50));
        assert_eq!(parse_float64(b"100", "OrderQty", &mut errors), Some(100.0));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_float64_invalid() {
        let mut errors = RowErrors::new();
        assert_eq!(parse_float64(b"1.2.3", "Price", &mut errors), None);
        assert_eq!(
            errors.into_message().as_deref(),
            Some("Invalid Price: '1.2.3'")
        );
    }

    #[test]
    fn test_timestamp_without_fraction() {
        let mut errors = RowErrors::new();
        let micros = parse_utc_timestamp_micros(b"20231215-10:30:00", "SendingTime", &mut errors);
        // 2023-12-15 10:30:00 UTC
        assert_eq!(micros, Some(1_702_636_200_000_000));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_timestamp_fraction_is_right_padded() {
        let mut errors = RowErrors::new();
        let base = parse_utc_timestamp_micros(b"20231215-10:30:00", "SendingTime", &mut errors)
            .unwrap();

        let one = parse_utc_timestamp_micros(b"20231215-10:30:00.1", "SendingTime", &mut errors)
            .unwrap();
        assert_eq!(one - base, 100_000);

        let three =
            parse_utc_timestamp_micros(b"20231215-10:30:00.123", "SendingTime", &mut errors)
                .unwrap();
        assert_eq!(three - base, 123_000);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_timestamp_sixteen_bytes_fails() {
        let mut errors = RowErrors::new();
        assert_eq!(
            parse_utc_timestamp_micros(b"20231215-10:30:0", "SendingTime", &mut errors),
            None
        );
        assert_eq!(
            errors.into_message().as_deref(),
            Some("Invalid SendingTime: '20231215-10:30:0' (too short)")
        );
    }

    #[test]
    fn test_timestamp_component_ranges() {
        for bad in [
            &b"20231315-10:30:00"[..], // month 13
            b"20231232-10:30:00",      // day 32
            b"20231215-24:30:00",      // hour 24
            b"20231215-10:60:00",      // minute 60
            b"20231215-10:30:60",      // second 60
            b"18991231-10:30:00",      // year 1899
            b"21010101-10:30:00",      // year 2101
        ] {
            let mut errors = RowErrors::new();
            assert_eq!(
                parse_utc_timestamp_micros(bad, "SendingTime", &mut errors),
                None,
                "expected failure for {:?}",
                String::from_utf8_lossy(bad)
            );
            assert!(!errors.is_empty());
        }
    }

    #[test]
    fn test_timestamp_missing_separators() {
        let mut errors = RowErrors::new();
        assert_eq!(
            parse_utc_timestamp_micros(b"20231215_10:30:00", "SendingTime", &mut errors),
            None
        );
        let message = errors.into_message().unwrap();
        assert!(message.contains("Missing date-time separator"));
    }

    #[test]
    fn test_timestamp_empty_is_null_not_error() {
        let mut errors = RowErrors::new();
        assert_eq!(
            parse_utc_timestamp_micros(b"", "SendingTime", &mut errors),
            None
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_timestamp_trailing_bytes_ignored() {
        let mut errors = RowErrors::new();
        let with_junk =
            parse_utc_timestamp_micros(b"20231215-10:30:00.123456", "SendingTime", &mut errors)
                .unwrap();
        let clean = parse_utc_timestamp_micros(b"20231215-10:30:00.123", "SendingTime", &mut errors)
            .unwrap();
        assert_eq!(with_junk, clean);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_row_errors_join() {
        let mut errors = RowErrors::new();
        errors.seed(Some(StructuralError::MissingMsgType));
        errors.push("Invalid Price: 'x'".to_string());
        assert_eq!(
            errors.into_message().as_deref(),
            Some("Missing required tag 35 (MsgType); Invalid Price: 'x'")
        );
    }

    #[test]
    fn test_row_errors_empty_yields_none() {
        let errors = RowErrors::new();
        assert!(errors.into_message().is_none());
    }
}
