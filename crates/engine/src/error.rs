//! The module contains the errors the engine can throw.
//!
//! Every variant except [`Database`] carries the message shown to the
//! caller; [`Database`] wraps an unexpected `DbErr` and is never shown
//! verbatim outside the server.
//!
//! [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A business rule on the submitted fields failed.
    #[error("{0}")]
    Validation(String),
    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The write collides with an existing record.
    #[error("{0}")]
    Conflict(String),
    /// A delete is blocked by rows that still reference the record.
    #[error("{0}")]
    ReferentialIntegrity(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::ReferentialIntegrity(a), Self::ReferentialIntegrity(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
