// Field-level parsing for spreadsheet values
//
// Both parsers are total: malformed input yields `None`, never an error.
use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use serde_json::Value;

/// Parse a numeric cell that may arrive as a JSON number or a string.
///
/// Strings are trimmed and the first comma is read as the decimal separator,
/// so `"71,86"` and `"71.86"` both give `71.86`. Anything that is not a
/// number or a string gives `None`.
pub fn parse_numeric_field(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64().and_then(parse_numeric_number),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    }
}

pub fn parse_numeric_number(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    let prefix = numeric_prefix(&normalized);
    if prefix.is_empty() {
        return None;
    }
    prefix.parse::<f64>().ok().and_then(parse_numeric_number)
}

/// Longest leading slice that reads as a decimal number (`-12.5e3`, `.5`, `7.`).
/// Trailing units or notes such as `"21.5 °F"` are cut off.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return "";
    }
    let mut end = i;

    // Exponent only counts when it carries at least one digit
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    &text[..end]
}

/// Parse a timestamp cell.
///
/// The spreadsheet writes `DD/MM/YY HH:mm:ss` in local time (components may be
/// one or two digits, the year is always 20YY). Anything else is tried as
/// ISO-8601. Non-string input and unparseable text give `None`.
pub fn parse_timestamp_field(raw: &Value) -> Option<DateTime<Local>> {
    match raw {
        Value::String(s) => parse_timestamp_text(s),
        _ => None,
    }
}

pub fn parse_timestamp_text(text: &str) -> Option<DateTime<Local>> {
    if text.is_empty() {
        return None;
    }

    match split_sheet_timestamp(text) {
        Some([day, month, year, hour, minute, second]) => {
            let date = NaiveDate::from_ymd_opt(2000 + year as i32, month, day)?;
            let naive = date.and_hms_opt(hour, minute, second)?;
            resolve_local(&Local, naive)
        }
        None => parse_iso_timestamp(text),
    }
}

/// Split `D/M/YY H:m:s` into its six integer groups. Returns `None` when the
/// text does not have that exact shape.
fn split_sheet_timestamp(text: &str) -> Option<[u32; 6]> {
    let (date, time) = text.split_once(|c: char| c.is_whitespace())?;
    let time = time.trim_start();

    let mut date_parts = date.split('/');
    let mut time_parts = time.split(':');
    let widths = [(1, 2), (1, 2), (2, 2), (1, 2), (1, 2), (1, 2)];
    let mut groups = [0u32; 6];

    for (idx, (min, max)) in widths.into_iter().enumerate() {
        let part = if idx < 3 { date_parts.next()? } else { time_parts.next()? };
        if part.len() < min || part.len() > max || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        groups[idx] = part.parse().ok()?;
    }

    if date_parts.next().is_some() || time_parts.next().is_some() {
        return None;
    }
    Some(groups)
}

/// Attach `tz` to a wall-clock time. Ambiguous times take the earlier
/// instant; a time skipped by a forward transition moves forward by the size
/// of the gap, so `02:30` on a spring-forward night reads as `03:30`.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            // Read the wall time with the offset in force before the jump
            let before = naive.checked_sub_signed(TimeDelta::days(1))?;
            let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
            let utc = naive.checked_sub_signed(TimeDelta::seconds(offset.local_minus_utc().into()))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

fn parse_iso_timestamp(text: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }

    // Date-time without an offset is local time
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return resolve_local(&Local, naive);
        }
    }

    // A bare date is midnight UTC
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use proptest::prelude::*;
    use serde_json::json;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_numeric_accepts_both_separators() {
        assert_eq!(parse_numeric_field(&json!("71,86")), Some(71.86));
        assert_eq!(parse_numeric_field(&json!("71.86")), Some(71.86));
        assert_eq!(parse_numeric_field(&json!("  -3,5 ")), Some(-3.5));
        assert_eq!(parse_numeric_field(&json!(42)), Some(42.0));
        assert_eq!(parse_numeric_field(&json!(71.86)), Some(71.86));
    }

    #[test]
    fn test_numeric_rejects_garbage() {
        assert_eq!(parse_numeric_number(f64::NAN), None);
        assert_eq!(parse_numeric_field(&json!("not a number")), None);
        assert_eq!(parse_numeric_field(&json!("")), None);
        assert_eq!(parse_numeric_field(&json!("   ")), None);
        assert_eq!(parse_numeric_field(&json!("-")), None);
        assert_eq!(parse_numeric_field(&json!(".")), None);
        assert_eq!(parse_numeric_field(&json!(null)), None);
        assert_eq!(parse_numeric_field(&json!(true)), None);
        assert_eq!(parse_numeric_field(&json!([1, 2])), None);
        assert_eq!(parse_numeric_field(&json!({"v": 1})), None);
    }

    #[test]
    fn test_numeric_reads_leading_number() {
        assert_eq!(parse_numeric_text("21,5 °F"), Some(21.5));
        assert_eq!(parse_numeric_text("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_text("2e"), Some(2.0));
        assert_eq!(parse_numeric_text(".5"), Some(0.5));
        assert_eq!(parse_numeric_text("7."), Some(7.0));
        // Only the first comma is a decimal separator
        assert_eq!(parse_numeric_text("1,234,5"), Some(1.234));
    }

    #[test]
    fn test_sheet_timestamp() {
        assert_eq!(
            parse_timestamp_field(&json!("10/02/26 10:42:57")),
            Some(local(2026, 2, 10, 10, 42, 57))
        );
        assert_eq!(
            parse_timestamp_field(&json!("1/2/26 9:05:07")),
            Some(local(2026, 2, 1, 9, 5, 7))
        );
        assert_eq!(
            parse_timestamp_field(&json!("01/12/99   23:59:59")),
            Some(local(2099, 12, 1, 23, 59, 59))
        );
    }

    #[test]
    fn test_sheet_timestamp_out_of_range() {
        assert_eq!(parse_timestamp_text("31/02/26 10:00:00"), None);
        assert_eq!(parse_timestamp_text("10/13/26 10:00:00"), None);
        assert_eq!(parse_timestamp_text("10/02/26 24:00:00"), None);
        assert_eq!(parse_timestamp_text("10/02/2026 10:00:00"), None);
        assert_eq!(parse_timestamp_text("10/02/26 10:00"), None);
    }

    #[test]
    fn test_iso_timestamp() {
        let utc = parse_timestamp_field(&json!("2026-02-10T10:42:57Z")).unwrap();
        assert_eq!(utc.with_timezone(&Utc), Utc.with_ymd_and_hms(2026, 2, 10, 10, 42, 57).unwrap());

        let offset = parse_timestamp_text("2026-02-10T12:42:57+02:00").unwrap();
        assert_eq!(offset, utc);

        assert_eq!(parse_timestamp_text("2026-02-10T10:42:57"), Some(local(2026, 2, 10, 10, 42, 57)));
        assert_eq!(parse_timestamp_text("2026-02-10T10:42"), Some(local(2026, 2, 10, 10, 42, 0)));
        assert_eq!(parse_timestamp_text("2026-02-10 10:42:57"), Some(local(2026, 2, 10, 10, 42, 57)));
        assert_eq!(parse_timestamp_text("2026-02-10 10:42:57.250").map(|t| t.timestamp_millis()),
            Some(local(2026, 2, 10, 10, 42, 57).timestamp_millis() + 250));

        let date_only = parse_timestamp_text("2026-02-10").unwrap();
        assert_eq!(date_only.with_timezone(&Utc), Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp_field(&json!("garbage")), None);
        assert_eq!(parse_timestamp_field(&json!("")), None);
        assert_eq!(parse_timestamp_field(&json!(1739180577)), None);
        assert_eq!(parse_timestamp_field(&json!(null)), None);
    }

    /// Fixed zone at +01:00 that jumps to +02:00 at 01:00 UTC on 2026-03-29,
    /// the way Europe/Amsterdam does.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        const WINTER: i32 = 3600;
        const SUMMER: i32 = 7200;

        fn transition() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2026, 3, 29).unwrap().and_hms_opt(1, 0, 0).unwrap()
        }

        fn fixed(secs: i32) -> FixedOffset {
            FixedOffset::east_opt(secs).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let as_winter = *local - TimeDelta::seconds(Self::WINTER.into());
            let as_summer = *local - TimeDelta::seconds(Self::SUMMER.into());
            match (as_winter < Self::transition(), as_summer >= Self::transition()) {
                (true, false) => LocalResult::Single(Self::fixed(Self::WINTER)),
                (false, true) => LocalResult::Single(Self::fixed(Self::SUMMER)),
                (true, true) => LocalResult::Ambiguous(Self::fixed(Self::SUMMER), Self::fixed(Self::WINTER)),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::transition() {
                Self::fixed(Self::WINTER)
            } else {
                Self::fixed(Self::SUMMER)
            }
        }
    }

    fn naive(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_wall_time_in_forward_gap_moves_past_it() {
        let resolved = resolve_local(&SpringForward, naive("2026-03-29 02:30:00")).unwrap();
        assert_eq!(resolved.naive_local(), naive("2026-03-29 03:30:00"));
        assert_eq!(resolved.naive_utc(), naive("2026-03-29 01:30:00"));

        // Either side of the gap is untouched
        let before = resolve_local(&SpringForward, naive("2026-03-29 01:59:59")).unwrap();
        assert_eq!(before.naive_utc(), naive("2026-03-29 00:59:59"));
        let after = resolve_local(&SpringForward, naive("2026-03-29 03:00:00")).unwrap();
        assert_eq!(after.naive_utc(), naive("2026-03-29 01:00:00"));
        assert!(before < resolved && after < resolved);
    }

    #[test]
    fn test_sheet_timestamp_near_transition_is_kept() {
        // Whatever the host zone, every valid calendar time yields an instant
        for text in ["29/03/26 02:30:00", "29/03/26 02:00:00", "25/10/26 02:30:00"] {
            assert!(parse_timestamp_text(text).is_some(), "{text} was dropped");
        }
    }

    proptest! {
        #[test]
        fn comma_and_period_parse_identically(whole in -100_000i64..100_000, frac in 0u32..10_000) {
            let period = format!("{}.{:04}", whole, frac);
            let comma = format!("{},{:04}", whole, frac);
            let expected: f64 = period.parse().unwrap();
            prop_assert_eq!(parse_numeric_text(&comma), Some(expected));
            prop_assert_eq!(parse_numeric_text(&period), Some(expected));
        }

        #[test]
        fn numeric_parse_never_panics(text in ".*") {
            let _ = parse_numeric_text(&text);
            let _ = parse_timestamp_text(&text);
        }
    }
}
