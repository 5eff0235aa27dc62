use chrono::NaiveDate;

pub mod attendance;
pub mod health;
pub mod salary;
pub mod sales;

/// Parses a calendar date in exactly `YYYY-MM-DD` form: zero-padded fields,
/// no sign, no surrounding whitespace, year 0001 or later.
pub(crate) fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = [0..4, 5..7, 8..10]
        .into_iter()
        .all(|range| bytes[range].iter().all(u8::is_ascii_digit));
    if !digits_ok || &raw[..4] == "0000" {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
