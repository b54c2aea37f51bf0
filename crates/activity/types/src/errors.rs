//! Error types for the activity layer

/// Errors that can occur in activity operations
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("activity fetch failed: {0}")]
    Fetch(String),

    #[error("unknown activity type: {0}")]
    UnknownActivityType(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for activity operations
pub type ActivityResult<T> = Result<T, ActivityError>;
