use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::aggregate::{aggregate, Aggregated};
use crate::error::Result;
use crate::impute::{impute_all, ImputationSummary};
use crate::ingestion::{read_source, SourceTable};
use crate::normalize::{normalize, FieldIssue};
use crate::report::{write_report, ReportMeta};
use crate::types::{DailyRecord, ImputedField, WeeklySummary};

#[derive(Debug, Clone, Serialize)]
pub struct FieldImputation {
    pub field: ImputedField,
    #[serde(flatten)]
    pub summary: ImputationSummary,
}

/// What one pipeline run saw and did.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub source: PathBuf,
    pub encoding: &'static str,
    pub fingerprint: String,
    pub row_count: usize,
    pub missing_dates: usize,
    pub field_issue_count: usize,
    pub week_count: usize,
    pub imputation: Vec<FieldImputation>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub daily: Vec<DailyRecord>,
    pub weekly: Vec<WeeklySummary>,
    pub issues: Vec<FieldIssue>,
    pub summary: PipelineSummary,
}

/// Ingest, normalize, impute and aggregate the table at `source`.
pub fn run_pipeline(source: &Path) -> Result<PipelineOutput> {
    let table = read_source(source)?;
    process_source(table)
}

/// Runs every stage after ingestion on an already decoded table.
pub fn process_source(source: SourceTable) -> Result<PipelineOutput> {
    let normalized = normalize(&source.table)?;
    let missing_dates = normalized.missing_dates();
    let issues = normalized.issues;
    let mut records = normalized.records;

    let imputation = impute_all(&mut records)
        .into_iter()
        .map(|(field, summary)| FieldImputation { field, summary })
        .collect();

    let Aggregated { daily, weekly } = aggregate(&records)?;

    let summary = PipelineSummary {
        source: source.path.clone(),
        encoding: source.encoding(),
        fingerprint: source.fingerprint.clone(),
        row_count: records.len(),
        missing_dates,
        field_issue_count: issues.len(),
        week_count: weekly.len(),
        imputation,
    };
    info!(
        rows = summary.row_count,
        weeks = summary.week_count,
        "pipeline finished"
    );

    Ok(PipelineOutput {
        daily,
        weekly,
        issues,
        summary,
    })
}

/// Writes the self-contained report for a finished run.
pub fn emit_report(output: &PipelineOutput, path: &Path) -> Result<()> {
    let meta = ReportMeta::new(
        &output.summary.source,
        output.summary.encoding,
        &output.summary.fingerprint,
    );
    write_report(path, &output.daily, &output.weekly, &meta)
}
