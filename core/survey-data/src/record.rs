//! FILENAME: core/survey-data/src/record.rs
//! Survey Record - One respondent's answers and the keys that address them.
//!
//! Field identifiers are opaque, exact-match strings. A key resolves to a
//! field when it equals either the canonical camelCase name (`privacyRating`)
//! or the raw survey question label, including the trailing whitespace the
//! survey export put into most labels. Anything else is a missing value.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// 1-based position of a record in the original, unfiltered dataset order.
pub type RowId = usize;

/// Key used wherever a missing value has to be rendered as text.
pub const UNDEFINED_KEY: &str = "undefined";

// ============================================================================
// FIELD
// ============================================================================

/// Every attribute a survey record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Timestamp,
    AgeGroup,
    Gender,
    Occupation,
    OnlineTime,
    PostingFrequency,
    TextingStyle,
    EmojiUse,
    PersonalityTest,
    PersonalityType,
    IntroExtro,
    PrivacyRating,
    AiAwareness,
    AiAccuracy,
    AiEthics,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Timestamp,
        Field::AgeGroup,
        Field::Gender,
        Field::Occupation,
        Field::OnlineTime,
        Field::PostingFrequency,
        Field::TextingStyle,
        Field::EmojiUse,
        Field::PersonalityTest,
        Field::PersonalityType,
        Field::IntroExtro,
        Field::PrivacyRating,
        Field::AiAwareness,
        Field::AiAccuracy,
        Field::AiEthics,
    ];

    /// Canonical camelCase name, as used by the table projection.
    pub fn key(self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::AgeGroup => "ageGroup",
            Field::Gender => "gender",
            Field::Occupation => "occupation",
            Field::OnlineTime => "onlineTime",
            Field::PostingFrequency => "postingFrequency",
            Field::TextingStyle => "textingStyle",
            Field::EmojiUse => "emojiUse",
            Field::PersonalityTest => "personalityTest",
            Field::PersonalityType => "personalityType",
            Field::IntroExtro => "introExtro",
            Field::PrivacyRating => "privacyRating",
            Field::AiAwareness => "aiAwareness",
            Field::AiAccuracy => "aiAccuracy",
            Field::AiEthics => "aiEthics",
        }
    }

    /// Raw question label from the survey export. Whitespace is significant.
    pub fn label(self) -> &'static str {
        match self {
            Field::Timestamp => "Timestamp",
            Field::AgeGroup => "Age Group",
            Field::Gender => "Gender",
            Field::Occupation => "Which of these best describes you?  ",
            Field::OnlineTime => "Average time you spend online daily",
            Field::PostingFrequency => "How often do you post on social media?  ",
            Field::TextingStyle => "My texting style is usually  ",
            Field::EmojiUse => "I mostly use emojis to express  ",
            Field::PersonalityTest => "Did u take any personality tests ?",
            Field::PersonalityType => "What is your personality type ?\n",
            Field::IntroExtro => "I consider myself more  ",
            Field::PrivacyRating => "I value online privacy  ",
            Field::AiAwareness => {
                "I was aware that AI can infer personality from my digital behaviour  "
            }
            Field::AiAccuracy => "Do you think AI personality predictions are accurate  ",
            Field::AiEthics => "AI inferring personality without asking is  ",
        }
    }

    /// Whether the field holds a 1-5 ordinal rating.
    pub fn is_rating(self) -> bool {
        matches!(
            self,
            Field::PrivacyRating | Field::AiAwareness | Field::AiAccuracy
        )
    }

    /// Resolves a key by exact match against the canonical name or the raw label.
    pub fn resolve(key: &str) -> Option<Field> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.key() == key || field.label() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// FIELD KEY
// ============================================================================

/// An opaque field identifier as supplied by a caller.
/// Kept verbatim; resolution happens at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(key: impl Into<String>) -> Self {
        FieldKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(&self) -> Option<Field> {
        Field::resolve(&self.0)
    }
}

impl From<Field> for FieldKey {
    fn from(field: Field) -> Self {
        FieldKey(field.key().to_string())
    }
}

impl From<&str> for FieldKey {
    fn from(key: &str) -> Self {
        FieldKey(key.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(key: String) -> Self {
        FieldKey(key)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A borrowed view of one attribute of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl<'a> FieldValue<'a> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Text form of the value. Missing values read as `"undefined"`.
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Missing => Cow::Borrowed(UNDEFINED_KEY),
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// One respondent's full set of survey answers.
///
/// Every attribute is optional so that a response lacking an answer can still
/// be carried through aggregation (it lands in the `"undefined"` group).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub timestamp: Option<String>,
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub occupation: Option<String>,
    pub online_time: Option<String>,
    pub posting_frequency: Option<String>,
    pub texting_style: Option<String>,
    pub emoji_use: Option<String>,
    pub personality_test: Option<String>,
    pub personality_type: Option<String>,
    pub intro_extro: Option<String>,
    pub privacy_rating: Option<u8>,
    pub ai_awareness: Option<u8>,
    pub ai_accuracy: Option<u8>,
    pub ai_ethics: Option<String>,
}

impl Record {
    /// Returns the value of a known field.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        let text = match field {
            Field::Timestamp => &self.timestamp,
            Field::AgeGroup => &self.age_group,
            Field::Gender => &self.gender,
            Field::Occupation => &self.occupation,
            Field::OnlineTime => &self.online_time,
            Field::PostingFrequency => &self.posting_frequency,
            Field::TextingStyle => &self.texting_style,
            Field::EmojiUse => &self.emoji_use,
            Field::PersonalityTest => &self.personality_test,
            Field::PersonalityType => &self.personality_type,
            Field::IntroExtro => &self.intro_extro,
            Field::AiEthics => &self.ai_ethics,
            Field::PrivacyRating | Field::AiAwareness | Field::AiAccuracy => {
                return match self.rating(field) {
                    Some(r) => FieldValue::Number(f64::from(r)),
                    None => FieldValue::Missing,
                };
            }
        };

        match text {
            Some(s) => FieldValue::Text(s.as_str()),
            None => FieldValue::Missing,
        }
    }

    /// Looks a value up by an opaque key. Unknown keys read as missing.
    pub fn get(&self, key: &str) -> FieldValue<'_> {
        match Field::resolve(key) {
            Some(field) => self.value(field),
            None => FieldValue::Missing,
        }
    }

    /// Returns the rating for one of the 1-5 fields, `None` for anything else.
    pub fn rating(&self, field: Field) -> Option<u8> {
        match field {
            Field::PrivacyRating => self.privacy_rating,
            Field::AiAwareness => self.ai_awareness,
            Field::AiAccuracy => self.ai_accuracy,
            _ => None,
        }
    }
}
