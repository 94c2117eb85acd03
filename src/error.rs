//! Error types for the metrics engine and record ingestion

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid goal: target amount must be positive (got {target})")]
    InvalidGoal { target: Decimal },

    #[error("Malformed record: {field} {reason}")]
    MalformedRecord { field: &'static str, reason: String },
}

impl CoreError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field,
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
