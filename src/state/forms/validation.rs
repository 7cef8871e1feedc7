//! Pre-submission validation

use super::field_map::FieldMap;

/// Aggregate message shown when any field is blank
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields before submitting.";

/// True when every leaf, at any depth, is non-blank after trimming
pub fn validate_all_filled(fields: &FieldMap) -> bool {
    fields
        .leaves()
        .iter()
        .all(|(_, value)| !value.trim().is_empty())
}
