//! FILENAME: core/survey-engine/src/view.rs
//! View Engine - The filtered, sorted row projection behind the table.
//!
//! Rows are numbered before anything is filtered, so a row keeps its
//! `row_id` across every filter and sort the presentation layer applies.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use serde::Serialize;
use survey_data::{log_debug, FieldValue, Record, RowId};

use crate::definition::{
    CategoryFilter, RatingFilter, SearchFilter, Selection, SortDirection, SortRule,
    ViewDefinition, ViewFilters,
};

/// Key addressing the row number column.
pub const ROW_ID_KEY: &str = "id";

// ============================================================================
// VIEW ROW
// ============================================================================

/// One record as it appears in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow<'a> {
    /// 1-based position in the unfiltered dataset.
    #[serde(rename = "id")]
    pub row_id: RowId,

    #[serde(flatten)]
    pub record: &'a Record,
}

impl<'a> ViewRow<'a> {
    /// Value of a column. `"id"` addresses the row number.
    pub fn value(&self, key: &str) -> FieldValue<'a> {
        if key == ROW_ID_KEY {
            return FieldValue::Number(self.row_id as f64);
        }
        self.record.get(key)
    }
}

/// Numbers every record by its original position. No filtering, no sorting.
pub fn project(records: &[Record]) -> Vec<ViewRow<'_>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| ViewRow {
            row_id: index + 1,
            record,
        })
        .collect()
}

// ============================================================================
// FILTERING
// ============================================================================

impl SearchFilter {
    pub fn matches(&self, row: &ViewRow<'_>) -> bool {
        if self.term.is_empty() {
            return true;
        }
        match row.value(self.field.as_str()) {
            FieldValue::Missing => false,
            value => value
                .to_text()
                .to_lowercase()
                .contains(&self.term.to_lowercase()),
        }
    }
}

impl CategoryFilter {
    pub fn matches(&self, row: &ViewRow<'_>) -> bool {
        match &self.selection {
            Selection::All => true,
            Selection::Value(expected) => match row.value(self.field.as_str()) {
                FieldValue::Missing => false,
                value => value.to_text() == expected.as_str(),
            },
        }
    }
}

impl RatingFilter {
    pub fn matches(&self, row: &ViewRow<'_>) -> bool {
        self.bucket.admits(row.value(self.field.as_str()).as_number())
    }
}

impl ViewFilters {
    /// All three predicates must hold.
    pub fn matches(&self, row: &ViewRow<'_>) -> bool {
        self.search.matches(row) && self.category.matches(row) && self.rating.matches(row)
    }
}

// ============================================================================
// SORTING
// ============================================================================

/// Numbers compare numerically; any other pair compares as lowercase text.
pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(na), FieldValue::Number(nb)) => {
            na.partial_cmp(&nb).unwrap_or(Ordering::Equal)
        }
        (a, b) => a.to_text().to_lowercase().cmp(&b.to_text().to_lowercase()),
    }
}

/// Stable sort of rows by one column.
pub fn sort_rows(rows: &mut [ViewRow<'_>], rule: &SortRule) {
    let key = rule.field.as_str();
    match rule.direction {
        SortDirection::Ascending => {
            rows.sort_by(|a, b| compare_values(a.value(key), b.value(key)));
        }
        SortDirection::Descending => {
            rows.sort_by(|a, b| compare_values(b.value(key), a.value(key)));
        }
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// Filters, then optionally sorts, the numbered projection of `records`.
pub fn view<'a>(records: &'a [Record], definition: &ViewDefinition) -> Vec<ViewRow<'a>> {
    let mut rows: Vec<ViewRow<'a>> = project(records)
        .into_iter()
        .filter(|row| definition.filters.matches(row))
        .collect();

    if let Some(rule) = &definition.sort {
        sort_rows(&mut rows, rule);
    }

    log_debug!(
        "VIEW",
        "records={} rows={} sort={:?}",
        records.len(),
        rows.len(),
        definition.sort.as_ref().map(|rule| (rule.field.as_str(), rule.direction))
    );
    rows
}

/// Dropdown options for a categorical filter: `"all"` followed by each
/// distinct value in first-seen order. Records missing the field add nothing.
pub fn category_options(records: &[Record], key: &str) -> Vec<Selection> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut options = vec![Selection::All];

    for record in records {
        let value = record.get(key);
        if value.is_missing() {
            continue;
        }
        let text = value.to_text();
        if !seen.contains(text.as_ref()) {
            seen.insert(text.to_string());
            options.push(Selection::Value(text.into_owned()));
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::RatingBucket;
    use survey_data::Field;

    fn respondent(age: &str, intro_extro: &str, privacy: u8) -> Record {
        Record {
            age_group: Some(age.to_string()),
            intro_extro: Some(intro_extro.to_string()),
            privacy_rating: Some(privacy),
            ..Default::default()
        }
    }

    fn create_test_records() -> Vec<Record> {
        vec![
            respondent("18-24", "Introvert", 5),
            respondent("25-34", "Extrovert", 2),
            respondent("18-24", "Ambivert", 3),
            respondent("Under 18", "introvert", 4),
            respondent("25-34", "Introvert", 1),
        ]
    }

    fn ids(rows: &[ViewRow<'_>]) -> Vec<RowId> {
        rows.iter().map(|row| row.row_id).collect()
    }

    #[test]
    fn test_project_numbers_from_one() {
        let records = create_test_records();
        assert_eq!(ids(&project(&records)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_no_constraints_is_identity() {
        let records = create_test_records();
        let rows = view(&records, &ViewDefinition::default());
        assert_eq!(rows, project(&records));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = create_test_records();
        let filters = ViewFilters::default().with_search("INTRO");
        let rows = view(&records, &ViewDefinition::new(filters));
        assert_eq!(ids(&rows), vec![1, 4, 5]);
    }

    #[test]
    fn test_category_filter_keeps_original_ids() {
        let records = create_test_records();
        let filters = ViewFilters::default().with_category("25-34");
        let rows = view(&records, &ViewDefinition::new(filters));
        assert_eq!(ids(&rows), vec![2, 5]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let records = create_test_records();
        let filters = ViewFilters::default().with_category("25-34 ");
        assert!(view(&records, &ViewDefinition::new(filters)).is_empty());
    }

    #[test]
    fn test_rating_buckets() {
        let records = create_test_records();
        let select = |bucket| {
            let filters = ViewFilters::default().with_rating(bucket);
            ids(&view(&records, &ViewDefinition::new(filters)))
        };
        assert_eq!(select(RatingBucket::Low), vec![2, 5]);
        assert_eq!(select(RatingBucket::Medium), vec![3]);
        assert_eq!(select(RatingBucket::High), vec![1, 4]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let records = create_test_records();
        let filters = ViewFilters::default()
            .with_search("intro")
            .with_category("25-34")
            .with_rating(RatingBucket::Low);
        let rows = view(&records, &ViewDefinition::new(filters));
        assert_eq!(ids(&rows), vec![5]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let records = create_test_records();
        let filters = ViewFilters::default().with_search("nobody");
        assert!(view(&records, &ViewDefinition::new(filters)).is_empty());
    }

    #[test]
    fn test_missing_field_never_matches() {
        let records = vec![Record::default()];
        let search = ViewFilters::default().with_search("a");
        let category = ViewFilters::default().with_category("18-24");
        let rating = ViewFilters::default().with_rating(RatingBucket::Low);
        for filters in [search, category, rating] {
            assert!(view(&records, &ViewDefinition::new(filters)).is_empty());
        }
        assert_eq!(view(&records, &ViewDefinition::default()).len(), 1);
    }

    #[test]
    fn test_sort_numeric() {
        let records = create_test_records();
        let definition = ViewDefinition::default().sorted(SortRule::ascending(Field::PrivacyRating));
        assert_eq!(ids(&view(&records, &definition)), vec![5, 2, 3, 4, 1]);
        let definition = ViewDefinition::default().sorted(SortRule::descending(Field::PrivacyRating));
        assert_eq!(ids(&view(&records, &definition)), vec![1, 4, 3, 2, 5]);
    }

    #[test]
    fn test_sort_text_ignores_case_and_is_stable() {
        let records = create_test_records();
        let definition = ViewDefinition::default().sorted(SortRule::ascending(Field::IntroExtro));
        // "Introvert" and "introvert" tie; ties keep input order.
        assert_eq!(ids(&view(&records, &definition)), vec![3, 2, 1, 4, 5]);
        let definition = ViewDefinition::default().sorted(SortRule::descending(Field::IntroExtro));
        assert_eq!(ids(&view(&records, &definition)), vec![1, 4, 5, 2, 3]);
    }

    #[test]
    fn test_sort_by_row_id() {
        let records = create_test_records();
        let definition = ViewDefinition::default().sorted(SortRule::descending(ROW_ID_KEY));
        assert_eq!(ids(&view(&records, &definition)), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_compare_mixed_values_as_text() {
        assert_eq!(
            compare_values(FieldValue::Number(10.0), FieldValue::Number(9.0)),
            Ordering::Greater
        );
        // As text "10" sorts before "9".
        assert_eq!(
            compare_values(FieldValue::Number(10.0), FieldValue::Text("9")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(FieldValue::Missing, FieldValue::Text("Undefined")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_category_options() {
        let records = create_test_records();
        let options = category_options(&records, Field::AgeGroup.key());
        assert_eq!(
            options,
            vec![
                Selection::All,
                Selection::from("18-24"),
                Selection::from("25-34"),
                Selection::from("Under 18"),
            ]
        );
    }

    #[test]
    fn test_view_row_serializes_flat() {
        let records = create_test_records();
        let rows = project(&records);
        let json = serde_json::to_value(rows[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["ageGroup"], "18-24");
        assert_eq!(json["privacyRating"], 5);
    }
}
