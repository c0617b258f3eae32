use csv::StringRecord;

use crate::errors::ParserError;
use crate::fields::clean_cell;
use crate::model::RawRecord;

/// Column names every source table must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "date",
    "type",
    "distance_km",
    "avg_pace",
    "avg_hr_bpm",
    "avg_cadence_spm",
    "rpe",
    "notes",
];

/// Positions of the required columns inside a particular header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    date: usize,
    activity_type: usize,
    distance_km: usize,
    avg_pace: usize,
    avg_hr_bpm: usize,
    avg_cadence_spm: usize,
    rpe: usize,
    notes: usize,
}

impl ColumnIndex {
    /// Matches header names exactly (case-sensitive). Extra columns are ignored; when a
    /// name appears twice the first occurrence wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, ParserError> {
        let position = |name: &str| headers.iter().position(|h| h.as_ref() == name);

        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| position(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ParserError::MissingColumns { columns: missing });
        }

        let at = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            date: at("date"),
            activity_type: at("type"),
            distance_km: at("distance_km"),
            avg_pace: at("avg_pace"),
            avg_hr_bpm: at("avg_hr_bpm"),
            avg_cadence_spm: at("avg_cadence_spm"),
            rpe: at("rpe"),
            notes: at("notes"),
        })
    }

    /// Projects one data row onto the eight source fields. Cells beyond the end of a short
    /// row and NA-like tokens come back as `None`.
    pub fn project(&self, row: &StringRecord) -> RawRecord {
        let cell = |idx: usize| clean_cell(row.get(idx));
        RawRecord {
            date: cell(self.date),
            activity_type: cell(self.activity_type),
            distance_km: cell(self.distance_km),
            avg_pace: cell(self.avg_pace),
            avg_hr_bpm: cell(self.avg_hr_bpm),
            avg_cadence_spm: cell(self.avg_cadence_spm),
            rpe: cell(self.rpe),
            notes: cell(self.notes),
        }
    }
}
