//! FILENAME: core/survey-engine/src/lib.rs
//! Analytics engine over the survey dataset.
//!
//! Pure functions only: every call receives the record set and the
//! parameters it needs and returns a freshly computed result. The record set
//! is borrowed and never modified.
//!
//! Layers:
//! - `definition`: Serializable parameters (WHAT to compute)
//! - `aggregate`: Grouping, averages, percentages, scatter (chart series)
//! - `view`: Filtered, sorted row projection (the table)
//! - `dashboard`: The fixed set of series the dashboard renders

pub mod definition;
pub mod aggregate;
pub mod view;
pub mod dashboard;

pub use definition::*;
pub use aggregate::{
    aggregate, apply_order, calculate_summary, overall_means, round_ratio, scatter,
    sort_by_count_desc, sort_by_key_order, with_percentages, FieldMean, GroupSummary,
    ScatterPoint,
};
pub use view::{category_options, compare_values, project, sort_rows, view, ViewRow, ROW_ID_KEY};
pub use dashboard::{
    build_dashboard, dashboard_definitions, DashboardReport, RatingAverage, RespondentPoint,
};

pub use survey_data::{Field, FieldKey, FieldValue, Record, RowId};
