use std::path::PathBuf;

pub const DEFAULT_SOURCE: &str = "run_log_plan_actual_summary.csv";
pub const DEFAULT_OUTPUT: &str = "run_dashboard.html";

pub const SOURCE_ENV: &str = "RUNLOG_SRC";
pub const OUTPUT_ENV: &str = "RUNLOG_OUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl Settings {
    /// Explicit values win, then the environment, then the built-in defaults.
    pub fn resolve<F>(source: Option<PathBuf>, output: Option<PathBuf>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<PathBuf>, key: &str, default: &str| {
            explicit
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            source: pick(source, SOURCE_ENV, DEFAULT_SOURCE),
            output: pick(output, OUTPUT_ENV, DEFAULT_OUTPUT),
        }
    }

    pub fn from_env(source: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        Self::resolve(source, output, |key| std::env::var(key).ok())
    }
}
