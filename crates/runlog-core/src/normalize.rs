use std::cmp::Ordering;

use runlog_parser::fields::{normalize_category, parse_date, parse_number, parse_pace};
use runlog_parser::{RawRecord, RawTable};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::types::{week_start, NormalizedRecord};

/// A non-empty source cell that could not be coerced and was recorded as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Zero-based data row index in source order.
    pub row: usize,
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<NormalizedRecord>,
    pub issues: Vec<FieldIssue>,
}

impl Normalized {
    pub fn missing_dates(&self) -> usize {
        self.records.iter().filter(|r| r.date.is_none()).count()
    }
}

/// Validates the schema, then types every row and sorts by date. Fails only when a
/// required column is absent.
pub fn normalize(table: &RawTable) -> Result<Normalized> {
    let raw = table.records()?;
    let normalized = normalize_records(raw);

    let missing_dates = normalized.missing_dates();
    if missing_dates > 0 {
        warn!(rows = missing_dates, "rows without a parseable date kept at the end");
    }
    info!(
        rows = normalized.records.len(),
        field_issues = normalized.issues.len(),
        "records normalized"
    );
    Ok(normalized)
}

pub fn normalize_records(raw: Vec<RawRecord>) -> Normalized {
    let mut issues = Vec::new();
    let mut records: Vec<NormalizedRecord> = raw
        .into_iter()
        .enumerate()
        .map(|(row, record)| normalize_row(row, record, &mut issues))
        .collect();

    sort_by_date(&mut records);

    Normalized { records, issues }
}

/// Ascending by date; rows with no date follow every dated row. Stable, so equal keys keep
/// their source order.
pub fn sort_by_date(records: &mut [NormalizedRecord]) {
    records.sort_by(|a, b| match (a.date, b.date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn normalize_row(row: usize, raw: RawRecord, issues: &mut Vec<FieldIssue>) -> NormalizedRecord {
    let mut coerce = |column: &'static str, value: Option<&str>, parse: fn(&str) -> Option<f64>| {
        let value = value?;
        let parsed = parse(value);
        if parsed.is_none() {
            debug!(row, column, value, "unparseable value recorded as missing");
            issues.push(FieldIssue {
                row,
                column,
                value: value.to_string(),
            });
        }
        parsed
    };

    let distance_km = coerce("distance_km", raw.distance_km.as_deref(), parse_number);
    let pace_minutes_per_km = coerce("avg_pace", raw.avg_pace.as_deref(), parse_pace);
    let hr_avg_bpm = coerce("avg_hr_bpm", raw.avg_hr_bpm.as_deref(), parse_number);
    let cadence_spm = coerce("avg_cadence_spm", raw.avg_cadence_spm.as_deref(), parse_number);
    let rpe = coerce("rpe", raw.rpe.as_deref(), parse_number);

    let date = match raw.date.as_deref() {
        Some(value) => {
            let parsed = parse_date(value);
            if parsed.is_none() {
                debug!(row, column = "date", value, "unparseable date recorded as missing");
                issues.push(FieldIssue {
                    row,
                    column: "date",
                    value: value.to_string(),
                });
            }
            parsed
        }
        None => None,
    };

    NormalizedRecord {
        date,
        activity_type: normalize_category(raw.activity_type.as_deref()),
        distance_km,
        pace_minutes_per_km,
        hr_avg_bpm,
        cadence_spm,
        rpe,
        notes: raw.notes.unwrap_or_default(),
        week_start: date.map(week_start),
    }
}
