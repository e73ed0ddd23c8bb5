//! FILENAME: core/survey-engine/src/dashboard.rs
//! Dashboard - Every chart series of the analytics dashboard in one report.
//!
//! Each series is an ordinary `AggregateDefinition` (or a scatter / mean
//! projection); this module only fixes which fields and orderings the
//! dashboard uses and bundles the results for the renderer.

use serde::Serialize;
use smallvec::SmallVec;
use survey_data::{log_enter, log_exit, Field, FieldKey, Record, RowId};

use crate::aggregate::{calculate_summary, overall_means, scatter, GroupSummary};
use crate::definition::{AggregateDefinition, GroupOrder};

/// Ethics answer quoted in the key-finding callout.
pub const DEPENDS_ON_USAGE: &str = "Depends on usage";

/// Posting group quoted in the privacy-paradox insight.
pub const RARELY: &str = "Rarely";

/// One respondent in the awareness/accuracy scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentPoint {
    pub name: String,
    pub row_id: RowId,
    pub awareness: f64,
    pub accuracy: f64,
}

/// One bar of the average-ratings comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverage {
    pub category: &'static str,
    pub field: Field,
    pub rating: f64,
}

/// All dashboard series, computed in one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub total_responses: usize,
    /// Posting frequency with average privacy rating, largest groups first.
    pub posting_privacy: Vec<GroupSummary>,
    /// Emoji purposes, largest first.
    pub emoji_use: Vec<GroupSummary>,
    pub ai_awareness_accuracy: Vec<RespondentPoint>,
    /// Introvert/extrovert/ambivert split with percentages, first-seen order.
    pub personality: Vec<GroupSummary>,
    /// Texting styles, largest first.
    pub texting_style: Vec<GroupSummary>,
    /// Ethics opinions with percentages, first-seen order.
    pub ai_ethics: Vec<GroupSummary>,
    pub average_ratings: SmallVec<[RatingAverage; 3]>,
}

impl DashboardReport {
    /// Percentage of respondents giving `opinion` on AI ethics.
    pub fn ethics_share(&self, opinion: &str) -> Option<f64> {
        self.ai_ethics
            .iter()
            .find(|group| group.key == opinion)
            .and_then(|group| group.percentage)
    }

    /// Average privacy rating of one posting-frequency group.
    pub fn posting_privacy_average(&self, posting: &str) -> Option<f64> {
        self.posting_privacy
            .iter()
            .find(|group| group.key == posting)
            .and_then(|group| group.average)
    }

    /// Overall mean of one rating field.
    pub fn average_rating(&self, field: Field) -> Option<f64> {
        self.average_ratings
            .iter()
            .find(|average| average.field == field)
            .map(|average| average.rating)
    }

    pub fn key_finding(&self) -> Option<f64> {
        self.ethics_share(DEPENDS_ON_USAGE)
    }

    pub fn privacy_paradox(&self) -> Option<f64> {
        self.posting_privacy_average(RARELY)
    }
}

const RATING_CATEGORIES: [(&str, Field); 3] = [
    ("Privacy Value", Field::PrivacyRating),
    ("AI Awareness", Field::AiAwareness),
    ("AI Accuracy Belief", Field::AiAccuracy),
];

/// The definitions behind the grouped series, in report order.
pub fn dashboard_definitions() -> [AggregateDefinition; 5] {
    [
        AggregateDefinition::new(Field::PostingFrequency)
            .with_metric(Field::PrivacyRating)
            .ordered(GroupOrder::CountDescending),
        AggregateDefinition::new(Field::EmojiUse).ordered(GroupOrder::CountDescending),
        AggregateDefinition::new(Field::IntroExtro).with_percentages(),
        AggregateDefinition::new(Field::TextingStyle).ordered(GroupOrder::CountDescending),
        AggregateDefinition::new(Field::AiEthics).with_percentages(),
    ]
}

/// Builds every dashboard series from `records`.
pub fn build_dashboard(records: &[Record]) -> DashboardReport {
    log_enter!("DASHBOARD", "build_dashboard", "records={}", records.len());

    let [posting, emoji, personality, texting, ethics] = dashboard_definitions();

    let ai_awareness_accuracy = scatter(
        records,
        &Field::AiAwareness.into(),
        &Field::AiAccuracy.into(),
    )
    .into_iter()
    .map(|point| RespondentPoint {
        name: format!("Respondent {}", point.row_id),
        row_id: point.row_id,
        awareness: point.x,
        accuracy: point.y,
    })
    .collect();

    let rating_fields: SmallVec<[FieldKey; 3]> = RATING_CATEGORIES
        .iter()
        .map(|(_, field)| FieldKey::from(*field))
        .collect();
    let average_ratings = overall_means(records, &rating_fields)
        .into_iter()
        .zip(RATING_CATEGORIES)
        .map(|(mean, (category, field))| RatingAverage {
            category,
            field,
            rating: mean.mean,
        })
        .collect();

    let report = DashboardReport {
        total_responses: records.len(),
        posting_privacy: calculate_summary(records, &posting),
        emoji_use: calculate_summary(records, &emoji),
        ai_awareness_accuracy,
        personality: calculate_summary(records, &personality),
        texting_style: calculate_summary(records, &texting),
        ai_ethics: calculate_summary(records, &ethics),
        average_ratings,
    };

    log_exit!(
        "DASHBOARD",
        "build_dashboard",
        "posting_groups={} ethics_groups={}",
        report.posting_privacy.len(),
        report.ai_ethics.len()
    );
    report
}
