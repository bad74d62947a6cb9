//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`MissingField`] thrown when a required request field is absent or empty.
//! - [`InvalidField`] thrown when a field is present but cannot be used.
//! - [`NotFound`] thrown when a referenced or targeted row does not exist.
//! - [`Database`] thrown when the store itself fails.
//!
//!  [`MissingField`]: EngineError::MissingField
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`NotFound`]: EngineError::NotFound
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
///
/// Messages are user facing and are sent back verbatim as `{"error": ...}`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    MissingField(String),
    #[error("{0}")]
    InvalidField(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// `"<field> es obligatorio"`
    pub(crate) fn required(field: &str) -> Self {
        Self::MissingField(format!("{field} es obligatorio"))
    }

    /// `"<field> inválido"`
    pub(crate) fn invalid(field: &str) -> Self {
        Self::InvalidField(format!("{field} inválido"))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
