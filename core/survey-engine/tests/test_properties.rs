//! FILENAME: tests/test_properties.rs
//! Property tests for the aggregator and the view engine.

use proptest::prelude::*;
use survey_engine::{
    aggregate, compare_values, project, sort_rows, view, Field, FieldKey, RatingBucket, Record,
    RowId, SortRule, ViewDefinition, ViewFilters,
};

const GROUP_FIELDS: [Field; 3] = [Field::AgeGroup, Field::PostingFrequency, Field::IntroExtro];

fn category() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        8 => prop::sample::select(vec!["Daily", "Daily ", "Weekly", "Rarely", "Introvert", "Extrovert", "18-24"])
            .prop_map(|s| Some(s.to_string())),
        1 => Just(None),
    ]
}

fn rating() -> impl Strategy<Value = Option<u8>> {
    prop_oneof![8 => (1u8..=5).prop_map(Some), 1 => Just(None)]
}

fn arb_record() -> impl Strategy<Value = Record> {
    (category(), category(), category(), rating(), rating()).prop_map(
        |(age_group, posting_frequency, intro_extro, privacy_rating, ai_awareness)| Record {
            age_group,
            posting_frequency,
            intro_extro,
            privacy_rating,
            ai_awareness,
            ..Default::default()
        },
    )
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..40)
}

fn arb_filters() -> impl Strategy<Value = ViewFilters> {
    (
        prop::sample::select(vec!["", "intro", "VERT", "x"]),
        prop::sample::select(vec!["all", "18-24", "Daily", "Daily "]),
        prop::sample::select(vec![
            RatingBucket::All,
            RatingBucket::Low,
            RatingBucket::Medium,
            RatingBucket::High,
        ]),
    )
        .prop_map(|(term, selection, bucket)| {
            ViewFilters::default()
                .with_search(term)
                .with_category(selection)
                .with_rating(bucket)
        })
}

fn arb_sort_key() -> impl Strategy<Value = FieldKey> {
    prop::sample::select(vec![
        FieldKey::from(Field::PrivacyRating),
        FieldKey::from(Field::AgeGroup),
        FieldKey::from(Field::IntroExtro),
        FieldKey::new("id"),
    ])
}

fn ids(records: &[Record], definition: &ViewDefinition) -> Vec<RowId> {
    view(records, definition).iter().map(|row| row.row_id).collect()
}

proptest! {
    #[test]
    fn counts_sum_to_record_count(records in arb_records(), field in prop::sample::select(GROUP_FIELDS.to_vec())) {
        let groups = aggregate(&records, &field.into(), None);
        let total: usize = groups.iter().map(|g| g.count).sum();
        prop_assert_eq!(total, records.len());
        prop_assert!(groups.iter().all(|g| g.count >= 1));
    }

    #[test]
    fn rating_averages_stay_on_scale(records in prop::collection::vec(arb_record(), 1..40)) {
        let complete: Vec<Record> = records
            .into_iter()
            .filter(|r| r.privacy_rating.is_some())
            .collect();
        let groups = aggregate(&complete, &Field::PostingFrequency.into(), Some(&Field::PrivacyRating.into()));
        for group in groups {
            let average = group.average.unwrap();
            prop_assert!((1.0..=5.0).contains(&average), "average {}", average);
        }
    }

    #[test]
    fn unconstrained_view_is_identity(records in arb_records()) {
        let rows = view(&records, &ViewDefinition::default());
        prop_assert_eq!(rows, project(&records));
    }

    #[test]
    fn filtering_is_idempotent(records in arb_records(), filters in arb_filters()) {
        let definition = ViewDefinition::new(filters);
        let once: Vec<Record> = view(&records, &definition)
            .into_iter()
            .map(|row| row.record.clone())
            .collect();
        let twice: Vec<Record> = view(&once, &definition)
            .into_iter()
            .map(|row| row.record.clone())
            .collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn row_ids_are_stable(records in arb_records(), filters in arb_filters(), key in arb_sort_key()) {
        let definition = ViewDefinition::new(filters).sorted(SortRule::ascending(key));
        for row in view(&records, &definition) {
            prop_assert!(row.row_id >= 1 && row.row_id <= records.len());
            prop_assert_eq!(row.record, &records[row.row_id - 1]);
        }
    }

    #[test]
    fn sorting_is_idempotent(records in arb_records(), key in arb_sort_key(), descending in any::<bool>()) {
        let rule = if descending { SortRule::descending(key) } else { SortRule::ascending(key) };
        let mut rows = view(&records, &ViewDefinition::default().sorted(rule.clone()));
        let sorted_once: Vec<RowId> = rows.iter().map(|row| row.row_id).collect();

        sort_rows(&mut rows, &rule);
        let sorted_twice: Vec<RowId> = rows.iter().map(|row| row.row_id).collect();
        prop_assert_eq!(sorted_twice, sorted_once);
    }

    #[test]
    fn descending_reverses_ascending(records in arb_records(), key in arb_sort_key()) {
        let asc = view(&records, &ViewDefinition::default().sorted(SortRule::ascending(key.clone())));
        let desc = view(&records, &ViewDefinition::default().sorted(SortRule::descending(key.clone())));
        prop_assert_eq!(asc.len(), desc.len());
        for (a, d) in asc.iter().zip(desc.iter().rev()) {
            let ordering = compare_values(a.value(key.as_str()), d.value(key.as_str()));
            prop_assert_eq!(ordering, std::cmp::Ordering::Equal);
        }
    }

    #[test]
    fn rating_buckets_partition(records in arb_records()) {
        let mut seen: Vec<RowId> = Vec::new();
        for bucket in [RatingBucket::Low, RatingBucket::Medium, RatingBucket::High] {
            seen.extend(ids(&records, &ViewDefinition::new(ViewFilters::default().with_rating(bucket))));
        }
        seen.sort_unstable();
        let rated: Vec<RowId> = project(&records)
            .iter()
            .filter(|row| row.record.privacy_rating.is_some())
            .map(|row| row.row_id)
            .collect();
        prop_assert_eq!(seen, rated);
    }
}
