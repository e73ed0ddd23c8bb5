//! FILENAME: core/survey-data/src/lib.rs
//! Survey data for the analytics engine.
//!
//! Leaf crate of the workspace: the immutable record model, the embedded
//! respondent dataset and the shared logging macros. Nothing here mutates a
//! record after load.

pub mod logging;
pub mod record;
pub mod dataset;
mod error;

pub use error::DataError;
pub use record::{Field, FieldKey, FieldValue, Record, RowId, UNDEFINED_KEY};
pub use dataset::{load_records, survey_records};
