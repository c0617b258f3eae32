use csv::StringRecord;

use crate::errors::ParserError;
use crate::schema::ColumnIndex;

/// One source row, untyped. `None` marks an empty or NA-like cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub date: Option<String>,
    pub activity_type: Option<String>,
    pub distance_km: Option<String>,
    pub avg_pace: Option<String>,
    pub avg_hr_bpm: Option<String>,
    pub avg_cadence_spm: Option<String>,
    pub rpe: Option<String>,
    pub notes: Option<String>,
}

/// A decoded source table: header, data rows and the encoding that produced them.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub encoding: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Checks the required schema and projects every row onto [`RawRecord`].
    pub fn records(&self) -> Result<Vec<RawRecord>, ParserError> {
        let index = ColumnIndex::resolve(&self.headers)?;
        Ok(self.rows.iter().map(|row| index.project(row)).collect())
    }
}
