use polars::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::frame::records_to_frame;
use crate::types::{format_date, DailyRecord, NormalizedRecord, WeeklySummary};

/// Immutable result of the aggregation stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregated {
    pub daily: Vec<DailyRecord>,
    pub weekly: Vec<WeeklySummary>,
}

pub fn aggregate(records: &[NormalizedRecord]) -> Result<Aggregated> {
    let daily = daily_table(records);
    let weekly = weekly_table(records)?;
    info!(
        daily_rows = daily.len(),
        weeks = weekly.len(),
        "daily and weekly tables built"
    );
    Ok(Aggregated { daily, weekly })
}

/// Projects records onto the daily shape, keeping their order. Cadence is not carried.
pub fn daily_table(records: &[NormalizedRecord]) -> Vec<DailyRecord> {
    records
        .iter()
        .map(|record| DailyRecord {
            date: record.date.map(format_date),
            activity_type: record.activity_type.clone(),
            dist_km: record.distance_km,
            pace_minpkm: record.pace_minutes_per_km,
            hr_avg: record.hr_avg_bpm,
            rpe: record.rpe,
            notes: record.notes.clone(),
        })
        .collect()
}

/// Groups records by Monday week start. Records without a week are dropped; missing
/// distances add nothing to the sum, and pace/RPE means cover present values only.
pub fn weekly_table(records: &[NormalizedRecord]) -> Result<Vec<WeeklySummary>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let frame = records_to_frame(records)?;
    let weekly = weekly_frame(frame)?;

    let weeks = weekly.column("week")?.str()?;
    let distance = weekly.column("dist_km")?.f64()?;
    let runs = weekly.column("runs")?.i64()?;
    let pace = weekly.column("pace_minpkm")?.f64()?;
    let rpe = weekly.column("rpe")?.f64()?;

    let mut summaries = Vec::with_capacity(weekly.height());
    for idx in 0..weekly.height() {
        let Some(week) = weeks.get(idx) else {
            continue;
        };
        summaries.push(WeeklySummary {
            week: week.to_string(),
            dist_km: distance.get(idx).unwrap_or(0.0),
            runs: runs.get(idx).unwrap_or(0).try_into().unwrap_or(u32::MAX),
            pace_minpkm: pace.get(idx),
            rpe: rpe.get(idx),
        });
    }

    Ok(summaries)
}

fn weekly_frame(frame: DataFrame) -> std::result::Result<DataFrame, PolarsError> {
    frame
        .lazy()
        .filter(col("week").is_not_null())
        .group_by([col("week")])
        .agg([
            col("dist_km").sum().fill_null(lit(0.0)).alias("dist_km"),
            col("date").count().cast(DataType::Int64).alias("runs"),
            col("pace_minpkm").mean().alias("pace_minpkm"),
            col("rpe").mean().alias("rpe"),
        ])
        .sort(["week"], SortMultipleOptions::default())
        .collect()
}
