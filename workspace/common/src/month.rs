use chrono::{Datelike, NaiveDate};

/// Builds the `YYYY-MM` key for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Checks that a string is a well-formed `YYYY-MM` month key.
///
/// Month keys sort chronologically with plain string ordering, which the
/// tracking history relies on, so the shape is validated at the boundary.
pub fn is_month_key(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    if !bytes[..4].iter().all(u8::is_ascii_digit) || !bytes[5..].iter().all(u8::is_ascii_digit) {
        return false;
    }
    matches!(value[5..].parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}
