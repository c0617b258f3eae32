use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{info, warn};

use crate::types::{ImputedField, NormalizedRecord};

/// Typical perceived exertion per activity category, used before any median fill.
pub static RPE_DEFAULTS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("easy", 5.0),
        ("long", 6.0),
        ("tempo", 7.0),
        ("interval", 8.0),
        ("race", 9.0),
        ("test", 6.0),
        ("rest", 2.0),
    ])
});

/// Where each value of one field came from after imputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImputationSummary {
    pub present: usize,
    pub from_type_default: usize,
    pub from_group_median: usize,
    pub from_global_median: usize,
    pub still_missing: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MedianFill {
    pub from_group: usize,
    pub from_global: usize,
}

/// Median of the given values; `None` when empty. Even-sized inputs average the two
/// middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Two-tier median fill over parallel `groups`/`values` slices. Missing values take the
/// median of present values sharing their group; whatever is still missing takes the median
/// of the whole column as it stands after the first tier. A `None` group never matches.
/// Present values are never changed.
pub fn fill_with_medians(groups: &[Option<&str>], values: &mut [Option<f64>]) -> MedianFill {
    debug_assert_eq!(groups.len(), values.len());
    let mut fill = MedianFill::default();

    let mut by_group: HashMap<&str, Vec<f64>> = HashMap::new();
    for (group, value) in groups.iter().zip(values.iter()) {
        if let (Some(group), Some(value)) = (group, value) {
            by_group.entry(*group).or_default().push(*value);
        }
    }
    let group_medians: HashMap<&str, f64> = by_group
        .into_iter()
        .filter_map(|(group, present)| median(&present).map(|m| (group, m)))
        .collect();

    for (group, value) in groups.iter().zip(values.iter_mut()) {
        if value.is_some() {
            continue;
        }
        if let Some(m) = group.and_then(|g| group_medians.get(g)) {
            *value = Some(*m);
            fill.from_group += 1;
        }
    }

    if values.iter().any(Option::is_none) {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if let Some(global) = median(&present) {
            for value in values.iter_mut().filter(|v| v.is_none()) {
                *value = Some(global);
                fill.from_global += 1;
            }
        }
    }

    fill
}

/// Fills one field in place across all records, grouping by activity type.
pub fn impute_field(records: &mut [NormalizedRecord], field: ImputedField) -> ImputationSummary {
    let mut summary = ImputationSummary {
        present: records.iter().filter(|r| field.get(r).is_some()).count(),
        ..Default::default()
    };

    if field == ImputedField::Rpe {
        for record in records.iter_mut().filter(|r| r.rpe.is_none()) {
            if let Some(default) = RPE_DEFAULTS.get(record.activity_type.as_str()) {
                record.rpe = Some(*default);
                summary.from_type_default += 1;
            }
        }
    }

    let mut values: Vec<Option<f64>> = records.iter().map(|r| field.get(r)).collect();
    let groups: Vec<Option<&str>> = records.iter().map(NormalizedRecord::group_key).collect();
    let fill = fill_with_medians(&groups, &mut values);

    for (record, value) in records.iter_mut().zip(values) {
        *field.slot(record) = value;
    }

    summary.from_group_median = fill.from_group;
    summary.from_global_median = fill.from_global;
    summary.still_missing = records.iter().filter(|r| field.get(r).is_none()).count();
    summary
}

/// Runs the imputer over pace, heart rate, cadence and RPE in that order.
pub fn impute_all(records: &mut [NormalizedRecord]) -> Vec<(ImputedField, ImputationSummary)> {
    ImputedField::ALL
        .iter()
        .map(|&field| {
            let summary = impute_field(records, field);
            if summary.still_missing > 0 && !records.is_empty() {
                warn!(
                    field = field.as_str(),
                    rows = summary.still_missing,
                    "field has no values anywhere; left missing"
                );
            }
            info!(
                field = field.as_str(),
                present = summary.present,
                type_default = summary.from_type_default,
                group_median = summary.from_group_median,
                global_median = summary.from_global_median,
                "field imputed"
            );
            (field, summary)
        })
        .collect()
}
