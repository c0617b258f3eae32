use polars::prelude::{Column, DataFrame, NamedFrom, PolarsError, Series};

use crate::types::{format_date, NormalizedRecord};

/// Column names of the normalized activity frame.
pub const FRAME_COLUMNS: [&str; 9] = [
    "date",
    "type",
    "dist_km",
    "pace_minpkm",
    "hr_avg",
    "cadence_spm",
    "rpe",
    "notes",
    "week",
];

/// Builds a columnar view of the normalized records, one row per record in the same
/// order. Dates are ISO `YYYY-MM-DD` strings so they group and sort lexically.
pub fn records_to_frame(records: &[NormalizedRecord]) -> Result<DataFrame, PolarsError> {
    let dates: Vec<Option<String>> = records.iter().map(|r| r.date.map(format_date)).collect();
    let types: Vec<&str> = records.iter().map(|r| r.activity_type.as_str()).collect();
    let notes: Vec<&str> = records.iter().map(|r| r.notes.as_str()).collect();
    let weeks: Vec<Option<String>> = records
        .iter()
        .map(|r| r.week_start.map(format_date))
        .collect();
    let numeric = |name: &str, get: fn(&NormalizedRecord) -> Option<f64>| -> Column {
        let values: Vec<Option<f64>> = records.iter().map(get).collect();
        Series::new(name.into(), values).into()
    };

    let columns: Vec<Column> = vec![
        Series::new("date".into(), dates).into(),
        Series::new("type".into(), types).into(),
        numeric("dist_km", |r| r.distance_km),
        numeric("pace_minpkm", |r| r.pace_minutes_per_km),
        numeric("hr_avg", |r| r.hr_avg_bpm),
        numeric("cadence_spm", |r| r.cadence_spm),
        numeric("rpe", |r| r.rpe),
        Series::new("notes".into(), notes).into(),
        Series::new("week".into(), weeks).into(),
    ];

    DataFrame::new(columns)
}
