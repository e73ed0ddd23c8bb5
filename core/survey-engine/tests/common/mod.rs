//! FILENAME: tests/common/mod.rs
//! Fixtures for survey-engine integration tests.

#![allow(dead_code)]

use survey_data::{survey_records, Record};

/// Record builders shared by the integration tests.
pub struct SurveyFixture;

impl SurveyFixture {
    /// The embedded 29-response dataset.
    pub fn embedded() -> &'static [Record] {
        survey_records().expect("embedded dataset parses")
    }

    /// Records carrying only a posting frequency, interleaved so that no
    /// group is contiguous in the input.
    pub fn posting_counts(counts: &[(&str, usize)]) -> Vec<Record> {
        let mut remaining: Vec<(&str, usize)> = counts.to_vec();
        let mut records = Vec::new();
        while remaining.iter().any(|(_, left)| *left > 0) {
            for (value, left) in remaining.iter_mut() {
                if *left > 0 {
                    records.push(Record {
                        posting_frequency: Some(value.to_string()),
                        ..Default::default()
                    });
                    *left -= 1;
                }
            }
        }
        records
    }

    /// A respondent with the fields the table filters look at.
    pub fn respondent(age: &str, intro_extro: &str, privacy: u8) -> Record {
        Record {
            age_group: Some(age.to_string()),
            intro_extro: Some(intro_extro.to_string()),
            privacy_rating: Some(privacy),
            ..Default::default()
        }
    }
}
