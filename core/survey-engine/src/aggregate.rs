//! FILENAME: core/survey-engine/src/aggregate.rs
//! Aggregator - Groups records into chart series.
//!
//! Algorithm:
//! 1. Single pass over the records, interning each distinct group key in
//!    first-seen order and accumulating count and metric sum per group
//! 2. Derive averages (2 decimals) from the accumulated sums
//! 3. Optionally attach percentages of the total (1 decimal)
//! 4. Optionally reorder (count descending or a fixed key order)
//!
//! Steps 3 and 4 are separate public operations; `calculate_summary` runs
//! the whole pipeline from an `AggregateDefinition`.

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use survey_data::{log_debug, FieldKey, FieldValue, Record, RowId};

use crate::definition::{AggregateDefinition, GroupOrder};

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One group of a grouped summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    /// Exact value of the grouping field (`"undefined"` when missing).
    pub key: String,

    /// Number of records in the group. Always at least 1.
    pub count: usize,

    /// Mean of the metric field, rounded half-up to 2 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,

    /// Share of the total record count, rounded half-up to 1 decimal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl GroupSummary {
    /// Average as displayed, e.g. `"3.80"`.
    pub fn display_average(&self) -> Option<String> {
        self.average.map(|a| format!("{:.2}", a))
    }

    /// Percentage as displayed, e.g. `"34.5"`.
    pub fn display_percentage(&self) -> Option<String> {
        self.percentage.map(|p| format!("{:.1}", p))
    }
}

/// One point of a bivariate projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub row_id: RowId,
    pub x: f64,
    pub y: f64,
}

/// Mean of one numeric field over the whole input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMean {
    pub field: FieldKey,
    pub mean: f64,
}

// ============================================================================
// ROUNDING
// ============================================================================

/// Rounds `numerator / denominator` half-up to `places` decimals.
///
/// Integral numerators (counts, rating sums) are rounded exactly in integer
/// arithmetic, so 4.125 becomes 4.13 and never 4.12. A zero denominator
/// yields 0.
pub fn round_ratio(numerator: f64, denominator: usize, places: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let scale = 10_i128.pow(places);

    if numerator.fract() == 0.0 && numerator.abs() < 1e15 {
        let n = numerator as i128;
        let d = denominator as i128;
        let scaled = (2 * n * scale + d).div_euclid(2 * d);
        return scaled as f64 / scale as f64;
    }

    let scale = scale as f64;
    ((numerator / denominator as f64) * scale + 0.5).floor() / scale
}

/// Numeric reading of a metric value. Missing or textual values count as 0.
fn metric_value(value: FieldValue<'_>) -> f64 {
    match value {
        FieldValue::Number(n) => n,
        FieldValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        FieldValue::Missing => 0.0,
    }
}

// ============================================================================
// GROUPING
// ============================================================================

#[derive(Debug)]
struct GroupAccumulator<'a> {
    key: Cow<'a, str>,
    count: usize,
    metric_sum: f64,
}

/// Partitions records by the exact value of `group_by`.
///
/// Groups come back in first-seen order. Keys are not trimmed or
/// case-folded. A record whose grouping value is missing is counted under
/// `"undefined"`. With a `metric`, each group carries the mean of that field.
pub fn aggregate(
    records: &[Record],
    group_by: &FieldKey,
    metric: Option<&FieldKey>,
) -> Vec<GroupSummary> {
    let mut key_to_index: FxHashMap<Cow<'_, str>, usize> = FxHashMap::default();
    let mut groups: Vec<GroupAccumulator<'_>> = Vec::new();

    for record in records {
        let key = record.get(group_by.as_str()).to_text();
        let index = match key_to_index.get(&key) {
            Some(&index) => index,
            None => {
                let index = groups.len();
                key_to_index.insert(key.clone(), index);
                groups.push(GroupAccumulator {
                    key,
                    count: 0,
                    metric_sum: 0.0,
                });
                index
            }
        };

        let group = &mut groups[index];
        group.count += 1;
        if let Some(metric) = metric {
            group.metric_sum += metric_value(record.get(metric.as_str()));
        }
    }

    log_debug!(
        "AGGREGATE",
        "group_by={:?} metric={:?} records={} groups={}",
        group_by.as_str(),
        metric.map(FieldKey::as_str),
        records.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|group| GroupSummary {
            average: metric.map(|_| round_ratio(group.metric_sum, group.count, 2)),
            key: group.key.into_owned(),
            count: group.count,
            percentage: None,
        })
        .collect()
}

/// Attaches each group's share of `total`, as a percentage with 1 decimal.
pub fn with_percentages(groups: &mut [GroupSummary], total: usize) {
    for group in groups.iter_mut() {
        group.percentage = Some(round_ratio((group.count * 100) as f64, total, 1));
    }
}

/// Largest groups first. Stable: equal counts keep their current order.
pub fn sort_by_count_desc(groups: &mut [GroupSummary]) {
    groups.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Orders groups by their position in `order`. Keys not listed keep their
/// relative order after the listed ones.
pub fn sort_by_key_order<S: AsRef<str>>(groups: &mut [GroupSummary], order: &[S]) {
    groups.sort_by_key(|group| {
        order
            .iter()
            .position(|key| key.as_ref() == group.key)
            .unwrap_or(order.len())
    });
}

/// Applies a `GroupOrder` to already-built groups.
pub fn apply_order(groups: &mut [GroupSummary], order: &GroupOrder) {
    match order {
        GroupOrder::FirstSeen => {}
        GroupOrder::CountDescending => sort_by_count_desc(groups),
        GroupOrder::Fixed(keys) => sort_by_key_order(groups, keys.as_slice()),
    }
}

/// Runs grouping, percentages and ordering as described by `definition`.
pub fn calculate_summary(records: &[Record], definition: &AggregateDefinition) -> Vec<GroupSummary> {
    let mut groups = aggregate(records, &definition.group_by, definition.metric.as_ref());
    if definition.percentages {
        with_percentages(&mut groups, records.len());
    }
    apply_order(&mut groups, &definition.order);
    groups
}

// ============================================================================
// PROJECTIONS WITHOUT GROUPING
// ============================================================================

/// One `(x, y)` point per record, in input order. Missing values read as 0.
pub fn scatter(records: &[Record], x: &FieldKey, y: &FieldKey) -> Vec<ScatterPoint> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| ScatterPoint {
            row_id: index + 1,
            x: metric_value(record.get(x.as_str())),
            y: metric_value(record.get(y.as_str())),
        })
        .collect()
}

/// Mean of each field over all records, rounded half-up to 2 decimals.
pub fn overall_means(records: &[Record], fields: &[FieldKey]) -> SmallVec<[FieldMean; 4]> {
    fields
        .iter()
        .map(|field| {
            let sum: f64 = records
                .iter()
                .map(|record| metric_value(record.get(field.as_str())))
                .sum();
            FieldMean {
                field: field.clone(),
                mean: round_ratio(sum, records.len(), 2),
            }
        })
        .collect()
}
