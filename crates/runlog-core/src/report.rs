use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::types::{DailyRecord, WeeklySummary};

const TEMPLATE: &str = include_str!("../templates/report.html");

const DAILY_PLACEHOLDER: &str = "__DAILY__";
const WEEKLY_PLACEHOLDER: &str = "__WEEKLY__";
const META_PLACEHOLDER: &str = "__META__";

/// Provenance shown in the report footer.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub source: String,
    pub encoding: String,
    pub fingerprint: String,
    pub generated_at: String,
}

impl ReportMeta {
    pub fn new(source: &Path, encoding: &str, fingerprint: &str) -> Self {
        Self {
            source: source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.display().to_string()),
            encoding: encoding.to_string(),
            fingerprint: fingerprint.to_string(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// JSON for embedding inside a `<script>` element. Non-ASCII text is kept as is.
pub fn embed_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}

/// Fills the report template with the two tables and the metadata block. Substitution is
/// a single pass over the template, so placeholder text inside the data is left alone.
pub fn render_report(
    daily: &[DailyRecord],
    weekly: &[WeeklySummary],
    meta: &ReportMeta,
) -> Result<String> {
    let values = [
        (DAILY_PLACEHOLDER, embed_json(daily)?),
        (WEEKLY_PLACEHOLDER, embed_json(weekly)?),
        (META_PLACEHOLDER, embed_json(meta)?),
    ];
    fill_placeholders(TEMPLATE, &values)
}

fn fill_placeholders(template: &str, values: &[(&str, String)]) -> Result<String> {
    for (placeholder, _) in values {
        if !template.contains(placeholder) {
            return Err(PipelineError::Report(format!(
                "template is missing placeholder {placeholder}"
            )));
        }
    }

    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;
    loop {
        let next = values
            .iter()
            .filter_map(|(placeholder, value)| {
                rest.find(placeholder).map(|pos| (pos, *placeholder, value))
            })
            .min_by_key(|(pos, _, _)| *pos);
        let Some((pos, placeholder, value)) = next else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..pos]);
        out.push_str(value);
        rest = &rest[pos + placeholder.len()..];
    }
    Ok(out)
}

pub fn write_report(
    path: &Path,
    daily: &[DailyRecord],
    weekly: &[WeeklySummary],
    meta: &ReportMeta,
) -> Result<()> {
    let html = render_report(daily, weekly, meta)?;
    std::fs::write(path, &html)?;
    info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_in_data_are_not_expanded() {
        let values = [
            ("__A__", "[\"__B__\"]".to_string()),
            ("__B__", "2".to_string()),
        ];
        let out = fill_placeholders("a=__A__; b=__B__;", &values).unwrap();
        assert_eq!(out, "a=[\"__B__\"]; b=2;");
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let values = [("__A__", "1".to_string())];
        let err = fill_placeholders("nothing here", &values).unwrap_err();
        assert!(matches!(err, PipelineError::Report(_)));
    }

    #[test]
    fn script_close_is_escaped() {
        let json = embed_json(&["</script><b>"]).unwrap();
        assert!(!json.contains("</"));
        assert_eq!(json, "[\"<\\/script><b>\"]");
    }
}
