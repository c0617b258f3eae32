pub mod aggregate;
pub mod config;
pub mod error;
pub mod frame;
pub mod impute;
pub mod ingestion;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod types;

pub use error::{PipelineError, Result};
pub use pipeline::{emit_report, process_source, run_pipeline, PipelineOutput, PipelineSummary};
