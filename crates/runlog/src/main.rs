use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use runlog_core::config::Settings;
use runlog_core::{emit_report, run_pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a self-contained running dashboard from a CSV log", long_about = None)]
struct Cli {
    /// Source activity table (falls back to RUNLOG_SRC)
    #[arg(long)]
    src: Option<PathBuf>,
    /// Output HTML report (falls back to RUNLOG_OUT)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env(cli.src, cli.out);

    let output = run_pipeline(&settings.source)
        .with_context(|| format!("failed to process {}", settings.source.display()))?;
    emit_report(&output, &settings.output)
        .with_context(|| format!("failed to write {}", settings.output.display()))?;

    info!(
        source = %settings.source.display(),
        output = %settings.output.display(),
        rows = output.summary.row_count,
        weeks = output.summary.week_count,
        "dashboard built"
    );
    println!("Wrote {}", settings.output.display());
    Ok(())
}
