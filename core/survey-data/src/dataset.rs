//! FILENAME: core/survey-data/src/dataset.rs
//! Dataset loading - Projects raw survey responses into Records.
//!
//! Raw responses are JSON objects keyed by the survey question labels
//! exactly as the form export wrote them. A response that lacks an answer,
//! or carries one of the wrong shape, is kept with that attribute missing.
//! Only a document that is not an array of objects is rejected.

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use crate::error::DataError;
use crate::record::{Field, Record};
use crate::{log_debug, log_info, log_warn};

/// The 29-response sample shipped with the application.
const EMBEDDED_SURVEY: &str = include_str!("../data/survey.json");

static SURVEY: OnceCell<Vec<Record>> = OnceCell::new();

/// Returns the embedded dataset, parsing it on first use.
pub fn survey_records() -> Result<&'static [Record], DataError> {
    SURVEY
        .get_or_try_init(|| load_records(EMBEDDED_SURVEY))
        .map(Vec::as_slice)
}

/// Parses a JSON array of raw responses.
pub fn load_records(json: &str) -> Result<Vec<Record>, DataError> {
    let document: Value = serde_json::from_str(json)?;
    let responses = document.as_array().ok_or_else(|| {
        DataError::InvalidFormat("expected a JSON array of survey responses".to_string())
    })?;

    let records = responses
        .iter()
        .enumerate()
        .map(|(index, response)| {
            let answers = response
                .as_object()
                .ok_or_else(|| DataError::InvalidResponse {
                    index,
                    reason: "response is not a JSON object".to_string(),
                })?;
            Ok(project_response(index, answers))
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    log_info!("DATA", "loaded {} survey responses", records.len());
    Ok(records)
}

/// Maps one raw response onto a Record.
fn project_response(index: usize, answers: &Map<String, Value>) -> Record {
    let text = |field: Field| text_answer(index, answers, field);
    let rating = |field: Field| rating_answer(index, answers, field);

    Record {
        timestamp: text(Field::Timestamp),
        age_group: text(Field::AgeGroup),
        gender: text(Field::Gender),
        occupation: text(Field::Occupation),
        online_time: text(Field::OnlineTime),
        posting_frequency: text(Field::PostingFrequency),
        texting_style: text(Field::TextingStyle),
        emoji_use: text(Field::EmojiUse),
        personality_test: text(Field::PersonalityTest),
        personality_type: text(Field::PersonalityType),
        intro_extro: text(Field::IntroExtro),
        privacy_rating: rating(Field::PrivacyRating),
        ai_awareness: rating(Field::AiAwareness),
        ai_accuracy: rating(Field::AiAccuracy),
        ai_ethics: text(Field::AiEthics),
    }
}

fn text_answer(index: usize, answers: &Map<String, Value>, field: Field) -> Option<String> {
    match answers.get(field.label()) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Null) | None => {
            log_debug!("DATA", "response {} has no answer for {}", index, field);
            None
        }
        Some(other) => {
            log_warn!("DATA", "response {} field {}: unexpected value {}", index, field, other);
            None
        }
    }
}

fn rating_answer(index: usize, answers: &Map<String, Value>, field: Field) -> Option<u8> {
    let raw = match answers.get(field.label()) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Null) | None => {
            log_debug!("DATA", "response {} has no rating for {}", index, field);
            return None;
        }
        Some(_) => None,
    };

    // Whole numbers only; 4.0 reads as 4, 2.5 does not.
    match raw {
        Some(r) if r.fract() == 0.0 && (1.0..=5.0).contains(&r) => Some(r as u8),
        _ => {
            log_warn!(
                "DATA",
                "response {} field {}: rating {:?} is not a whole number in 1-5, treated as missing",
                index,
                field,
                answers.get(field.label())
            );
            None
        }
    }
}
