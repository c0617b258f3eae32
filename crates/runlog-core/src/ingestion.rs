use std::path::{Path, PathBuf};

use blake3::Hasher;
use runlog_parser::{read_table, RawTable};
use tracing::info;

use crate::error::Result;

/// A decoded source table plus where it came from.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    pub fingerprint: String,
    pub table: RawTable,
}

impl SourceTable {
    pub fn encoding(&self) -> &'static str {
        self.table.encoding
    }
}

/// Reads the source table from disk, trying the fixed encoding candidate list.
pub fn read_source(path: &Path) -> Result<SourceTable> {
    let contents = std::fs::read(path)?;
    let source = read_source_bytes(path, &contents)?;
    info!(
        path = %path.display(),
        encoding = source.encoding(),
        rows = source.table.row_count(),
        fingerprint = %source.fingerprint,
        "source table read"
    );
    Ok(source)
}

pub fn read_source_bytes(path: &Path, contents: &[u8]) -> Result<SourceTable> {
    let table = read_table(contents)?;
    Ok(SourceTable {
        path: path.to_path_buf(),
        fingerprint: compute_hash(contents),
        table,
    })
}

fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
