use std::fs;
use std::path::{Path, PathBuf};

use runlog_core::types::ImputedField;
use runlog_core::{emit_report, run_pipeline, PipelineError};
use runlog_parser::ParserError;

const HEADER: &str = "date,type,distance_km,avg_pace,avg_hr_bpm,avg_cadence_spm,rpe,notes";

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn approx(actual: Option<f64>, expected: f64) {
    let value = actual.unwrap_or_else(|| panic!("expected {expected}, got None"));
    assert!((value - expected).abs() < 1e-9, "expected {expected}, got {value}");
}

#[test]
fn sample_log_end_to_end() {
    let output = run_pipeline(&fixture_path("run_log_sample.csv")).expect("pipeline failed");

    let dates: Vec<Option<&str>> = output.daily.iter().map(|d| d.date.as_deref()).collect();
    assert_eq!(
        dates,
        vec![
            Some("2024-03-04"),
            Some("2024-03-05"),
            Some("2024-03-06"),
            Some("2024-03-10"),
            Some("2024-03-11"),
            None,
        ]
    );

    // rest has no pace of its own: global median over {6.0, 5.0, 6.5, 6.5, 6.25}.
    approx(output.daily[1].pace_minpkm, 6.25);
    // the undated easy row takes the easy median of {6.0, 6.5}.
    approx(output.daily[5].pace_minpkm, 6.25);
    // easy heart rate median of {140, 130}.
    approx(output.daily[4].hr_avg, 135.0);
    approx(output.daily[1].hr_avg, 140.0);
    // rpe from the category defaults.
    approx(output.daily[0].rpe, 5.0);
    approx(output.daily[1].rpe, 2.0);
    approx(output.daily[3].rpe, 6.0);
    approx(output.daily[4].rpe, 4.0);
    // distance is never imputed.
    assert_eq!(output.daily[4].dist_km, None);

    assert_eq!(output.weekly.len(), 2);
    let first = &output.weekly[0];
    assert_eq!(first.week, "2024-03-04");
    assert_eq!(first.runs, 4);
    approx(Some(first.dist_km), 29.0);
    approx(first.pace_minpkm, 5.9375);
    approx(first.rpe, 5.0);
    let second = &output.weekly[1];
    assert_eq!(second.week, "2024-03-11");
    assert_eq!(second.runs, 1);
    approx(Some(second.dist_km), 0.0);

    let summary = &output.summary;
    assert_eq!(summary.encoding, "utf-8-sig");
    assert_eq!(summary.row_count, 6);
    assert_eq!(summary.missing_dates, 1);
    assert_eq!(summary.field_issue_count, 2);
    assert_eq!(summary.week_count, 2);
    assert_eq!(summary.fingerprint.len(), 64);

    let rpe = summary
        .imputation
        .iter()
        .find(|entry| entry.field == ImputedField::Rpe)
        .unwrap();
    assert_eq!(rpe.summary.present, 2);
    assert_eq!(rpe.summary.from_type_default, 4);
    assert_eq!(rpe.summary.still_missing, 0);
}

#[test]
fn report_embeds_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dashboard.html");

    let output = run_pipeline(&fixture_path("run_log_sample.csv")).unwrap();
    emit_report(&output, &out).unwrap();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("__DAILY__"));
    assert!(!html.contains("__WEEKLY__"));
    assert!(!html.contains("__META__"));
    assert!(html.contains(r#""week":"2024-03-04","dist_km":29.0,"runs":4"#));
    assert!(html.contains(r#""notes":"long run""#));
    assert!(html.contains(r#""source":"run_log_sample.csv""#));
}

#[test]
fn header_only_source_produces_empty_tables() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("empty.csv");
    fs::write(&src, format!("{HEADER}\n")).unwrap();

    let output = run_pipeline(&src).unwrap();
    assert!(output.daily.is_empty());
    assert!(output.weekly.is_empty());

    let out = dir.path().join("empty.html");
    emit_report(&output, &out).unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("const DAILY = [];"));
    assert!(html.contains("const WEEKLY = [];"));
}

#[test]
fn korean_legacy_source_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("korean.csv");
    let content = format!("{HEADER}\n2024-03-04,Easy,5.0,6:10,141,171,,회복 조깅\n");
    let (bytes, _, _) = encoding_rs::EUC_KR.encode(&content);
    fs::write(&src, &bytes).unwrap();

    let output = run_pipeline(&src).unwrap();

    assert_eq!(output.summary.encoding, "cp949");
    assert_eq!(output.daily[0].notes, "회복 조깅");
    assert_eq!(output.daily[0].activity_type, "easy");
    approx(output.daily[0].rpe, 5.0);
}

#[test]
fn missing_rpe_column_names_rpe() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("no_rpe.csv");
    fs::write(
        &src,
        "date,type,distance_km,avg_pace,avg_hr_bpm,avg_cadence_spm,notes\n2024-03-04,easy,5,6:00,140,170,\n",
    )
    .unwrap();

    let err = run_pipeline(&src).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Parser(ParserError::MissingColumns { .. })
    ));
    assert!(err.to_string().contains("rpe"));
}

#[test]
fn unreadable_source_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_pipeline(&dir.path().join("does-not-exist.csv")).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}
