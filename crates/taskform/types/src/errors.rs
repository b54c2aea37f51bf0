//! Error types for the task-form layer

use crate::TaskId;

/// Errors that can occur in task-form operations
#[derive(Debug, thiserror::Error)]
pub enum TaskFormError {
    #[error("{0}")]
    HandlerFailed(String),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("task service call failed: {0}")]
    Service(String),

    #[error("action context is missing a task id")]
    MissingTaskId,
}

/// Result type alias for task-form operations
pub type TaskFormResult<T> = Result<T, TaskFormError>;
