use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Cell contents treated as "no value" in every column.
pub const NA_TOKENS: [&str; 12] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

static DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Returns `None` for absent, blank or NA-token cells, otherwise the cell text untouched.
pub fn clean_cell(value: Option<&str>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || NA_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Permissive calendar-date parse. Time-of-day and offsets are accepted and discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Decimal coercion; anything that is not a finite number is missing.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Pace in minutes per kilometre. A plain decimal is taken as minutes directly; otherwise
/// `m:ss` with one or two digits on each side (whitespace allowed around the colon) and
/// seconds below 60.
pub fn parse_pace(value: &str) -> Option<f64> {
    parse_number(value).or_else(|| parse_minutes_seconds(value))
}

fn parse_minutes_seconds(value: &str) -> Option<f64> {
    let (minutes, seconds) = value.trim().split_once(':')?;
    let minutes = parse_short_digits(minutes.trim())?;
    let seconds = parse_short_digits(seconds.trim())?;
    if seconds >= 60 {
        return None;
    }
    Some(f64::from(minutes) + f64::from(seconds) / 60.0)
}

fn parse_short_digits(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Activity category key: trimmed and lowercased, empty when absent.
pub fn normalize_category(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_lowercase()).unwrap_or_default()
}
