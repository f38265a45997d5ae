//! Dispatch Domain Concerns

use thiserror::Error;

pub mod carriers;
pub mod routes;
pub mod shipments;
pub mod users;

/// Returned when parsing a status or role name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariantError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
