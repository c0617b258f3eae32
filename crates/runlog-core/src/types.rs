use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// A typed activity row. Numeric fields are `None` when the source cell was absent or did
/// not parse; zero is a real value.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date: Option<NaiveDate>,
    pub activity_type: String,
    pub distance_km: Option<f64>,
    pub pace_minutes_per_km: Option<f64>,
    pub hr_avg_bpm: Option<f64>,
    pub cadence_spm: Option<f64>,
    pub rpe: Option<f64>,
    pub notes: String,
    pub week_start: Option<NaiveDate>,
}

impl NormalizedRecord {
    /// Grouping key for imputation. Rows without a category belong to no group.
    pub fn group_key(&self) -> Option<&str> {
        if self.activity_type.is_empty() {
            None
        } else {
            Some(self.activity_type.as_str())
        }
    }
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Fields filled by the imputer, in the order they are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputedField {
    Pace,
    HeartRate,
    Cadence,
    Rpe,
}

impl ImputedField {
    pub const ALL: [ImputedField; 4] = [
        ImputedField::Pace,
        ImputedField::HeartRate,
        ImputedField::Cadence,
        ImputedField::Rpe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImputedField::Pace => "pace_minutes_per_km",
            ImputedField::HeartRate => "hr_avg_bpm",
            ImputedField::Cadence => "cadence_spm",
            ImputedField::Rpe => "rpe",
        }
    }

    pub fn get(&self, record: &NormalizedRecord) -> Option<f64> {
        match self {
            ImputedField::Pace => record.pace_minutes_per_km,
            ImputedField::HeartRate => record.hr_avg_bpm,
            ImputedField::Cadence => record.cadence_spm,
            ImputedField::Rpe => record.rpe,
        }
    }

    pub fn slot<'a>(&self, record: &'a mut NormalizedRecord) -> &'a mut Option<f64> {
        match self {
            ImputedField::Pace => &mut record.pace_minutes_per_km,
            ImputedField::HeartRate => &mut record.hr_avg_bpm,
            ImputedField::Cadence => &mut record.cadence_spm,
            ImputedField::Rpe => &mut record.rpe,
        }
    }
}

impl std::fmt::Display for ImputedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily record in the shape the report consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub dist_km: Option<f64>,
    pub pace_minpkm: Option<f64>,
    pub hr_avg: Option<f64>,
    pub rpe: Option<f64>,
    pub notes: String,
}

/// One calendar week (Monday start) of activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub week: String,
    pub dist_km: f64,
    pub runs: u32,
    pub pace_minpkm: Option<f64>,
    pub rpe: Option<f64>,
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
