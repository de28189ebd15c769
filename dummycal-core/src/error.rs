//! Error types for dummycal.

use thiserror::Error;

use crate::store::AuthorizationStatus;

/// Errors that can occur while talking to a calendar store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Calendar '{0}' is read-only")]
    ReadOnlyCalendar(String),

    #[error("Calendar access is not authorized ({0})")]
    NotAuthorized(AuthorizationStatus),

    #[error("Too many event name collisions for '{0}'")]
    SlugExhausted(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Commit failed: {0}")]
    Commit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
