//! FILENAME: core/survey-engine/src/definition.rs
//! Definitions - The serializable parameters of every calculation.
//!
//! The engine keeps no state. Whatever the presentation layer holds (the
//! current search term, dropdown selections, sort column) is described by
//! these types and passed in on each call.

use serde::{Deserialize, Serialize};
use survey_data::{Field, FieldKey};

/// Sentinel selection value meaning "no constraint".
pub const ALL_SENTINEL: &str = "all";

// ============================================================================
// AGGREGATION
// ============================================================================

/// Ordering applied to groups after they have been built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupOrder {
    /// Order in which distinct keys were first seen.
    FirstSeen,
    /// Largest groups first; ties keep first-seen order.
    CountDescending,
    /// Caller-specified key order; unlisted keys follow in first-seen order.
    Fixed(Vec<String>),
}

impl Default for GroupOrder {
    fn default() -> Self {
        GroupOrder::FirstSeen
    }
}

/// Describes one grouped summary (one chart series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateDefinition {
    /// Categorical field whose exact values form the groups.
    pub group_by: FieldKey,

    /// Numeric field to average within each group.
    #[serde(default)]
    pub metric: Option<FieldKey>,

    /// Whether to attach each group's share of the total.
    #[serde(default)]
    pub percentages: bool,

    #[serde(default)]
    pub order: GroupOrder,
}

impl AggregateDefinition {
    pub fn new(group_by: impl Into<FieldKey>) -> Self {
        AggregateDefinition {
            group_by: group_by.into(),
            metric: None,
            percentages: false,
            order: GroupOrder::FirstSeen,
        }
    }

    pub fn with_metric(mut self, metric: impl Into<FieldKey>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub fn with_percentages(mut self) -> Self {
        self.percentages = true;
        self
    }

    pub fn ordered(mut self, order: GroupOrder) -> Self {
        self.order = order;
        self
    }
}

// ============================================================================
// SORTING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort the table by one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRule {
    pub field: FieldKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortRule {
    pub fn ascending(field: impl Into<FieldKey>) -> Self {
        SortRule {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<FieldKey>) -> Self {
        SortRule {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Header-click rule: the current column flips direction, a new column
    /// starts ascending.
    pub fn toggle(current: Option<&SortRule>, field: impl Into<FieldKey>) -> SortRule {
        let field = field.into();
        match current {
            Some(rule) if rule.field == field => SortRule {
                field,
                direction: rule.direction.reversed(),
            },
            _ => SortRule::ascending(field),
        }
    }
}

// ============================================================================
// FILTERS
// ============================================================================

/// A dropdown selection: either the `"all"` sentinel or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    All,
    Value(String),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::All
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL_SENTINEL {
            Selection::All
        } else {
            Selection::Value(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL_SENTINEL.to_string(),
            Selection::Value(value) => value,
        }
    }
}

/// Three-bucket band over a 1-5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBucket {
    All,
    /// Rating of 2 or below.
    Low,
    /// Rating of exactly 3.
    Medium,
    /// Rating of 4 or above.
    High,
}

impl Default for RatingBucket {
    fn default() -> Self {
        RatingBucket::All
    }
}

impl RatingBucket {
    /// The band a rating falls in (also drives the table's badge colour).
    pub fn classify(rating: f64) -> RatingBucket {
        if rating >= 4.0 {
            RatingBucket::High
        } else if rating == 3.0 {
            RatingBucket::Medium
        } else {
            RatingBucket::Low
        }
    }

    /// Whether a rating passes this bucket. A missing rating only passes `All`.
    pub fn admits(self, rating: Option<f64>) -> bool {
        match (self, rating) {
            (RatingBucket::All, _) => true,
            (_, None) => false,
            (RatingBucket::Low, Some(r)) => r <= 2.0,
            (RatingBucket::Medium, Some(r)) => r == 3.0,
            (RatingBucket::High, Some(r)) => r >= 4.0,
        }
    }
}

/// Case-insensitive substring search on one text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub field: FieldKey,
    /// Empty means no constraint.
    #[serde(default)]
    pub term: String,
}

impl Default for SearchFilter {
    fn default() -> Self {
        SearchFilter {
            field: Field::IntroExtro.into(),
            term: String::new(),
        }
    }
}

/// Exact equality on one categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    pub field: FieldKey,
    #[serde(default)]
    pub selection: Selection,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter {
            field: Field::AgeGroup.into(),
            selection: Selection::All,
        }
    }
}

/// Rating band on one 1-5 field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingFilter {
    pub field: FieldKey,
    #[serde(default)]
    pub bucket: RatingBucket,
}

impl Default for RatingFilter {
    fn default() -> Self {
        RatingFilter {
            field: Field::PrivacyRating.into(),
            bucket: RatingBucket::All,
        }
    }
}

/// The conjunction of table filters. The default constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewFilters {
    pub search: SearchFilter,
    pub category: CategoryFilter,
    pub rating: RatingFilter,
}

impl ViewFilters {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search.term = term.into();
        self
    }

    pub fn with_category(mut self, selection: impl Into<Selection>) -> Self {
        self.category.selection = selection.into();
        self
    }

    pub fn with_rating(mut self, bucket: RatingBucket) -> Self {
        self.rating.bucket = bucket;
        self
    }

    /// True when no filter constrains anything.
    pub fn is_pass_through(&self) -> bool {
        self.search.term.is_empty()
            && self.category.selection == Selection::All
            && self.rating.bucket == RatingBucket::All
    }
}

/// Everything the table view needs for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewDefinition {
    pub filters: ViewFilters,
    pub sort: Option<SortRule>,
}

impl ViewDefinition {
    pub fn new(filters: ViewFilters) -> Self {
        ViewDefinition {
            filters,
            sort: None,
        }
    }

    pub fn sorted(mut self, rule: SortRule) -> Self {
        self.sort = Some(rule);
        self
    }
}
