//! Workflow task records: the task/form contract consumed from the engine
//!
//! The workflow engine itself is an external collaborator; what crosses the
//! boundary is this record — a task plus the schema/hints/values triple its
//! form renders from.

use crate::{ActionDescriptor, FormSchema, FormValues, UiHints};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a workflow task
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a workflow execution
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub String);

impl ExecutionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Task ─────────────────────────────────────────────────────────────

/// Lifecycle status of a workflow task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Unclaimed, waiting in the inbox
    Ready,
    /// Claimed by a user
    Claimed,
    /// Form submitted, task finished
    Completed,
    /// Cancelled upstream
    Cancelled,
}

impl TaskStatus {
    pub fn is_actionable(&self) -> bool {
        matches!(self, TaskStatus::Ready | TaskStatus::Claimed)
    }
}

/// A human task emitted by the workflow engine, with its form contract
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTask {
    /// Unique identifier
    pub id: TaskId,
    /// Display name
    pub name: String,
    /// Lifecycle status
    pub status: TaskStatus,
    /// The user who claimed the task, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// The workflow execution this task belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<ExecutionId>,
    /// Declarative form schema
    pub schema: FormSchema,
    /// Parallel UI hints (widgets, display-if predicates)
    #[serde(default)]
    pub ui_hints: UiHints,
    /// Current form values (drafts land here)
    #[serde(default)]
    pub values: FormValues,
    /// Actions the form offers
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
    /// When the task was created
    pub created_at: DateTime<Utc>,
    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
}

impl WorkflowTask {
    pub fn new(id: TaskId, name: impl Into<String>, schema: FormSchema) -> Self {
        Self {
            id,
            name: name.into(),
            status: TaskStatus::Ready,
            assignee: None,
            execution_id: None,
            schema,
            ui_hints: UiHints::new(),
            values: FormValues::new(),
            actions: Vec::new(),
            created_at: Utc::now(),
            due_at: None,
        }
    }

    pub fn with_ui_hints(mut self, ui_hints: UiHints) -> Self {
        self.ui_hints = ui_hints;
        self
    }

    pub fn with_values(mut self, values: FormValues) -> Self {
        self.values = values;
        self
    }

    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_execution_id(mut self, execution_id: ExecutionId) -> Self {
        self.execution_id = Some(execution_id);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionId, FieldSchema};

    #[test]
    fn test_task_builders() {
        let task = WorkflowTask::new(
            TaskId::new("task-1"),
            "Approve expense",
            FormSchema::new("Expense").with_field("amount", FieldSchema::text("Amount")),
        )
        .with_execution_id(ExecutionId::new("exec-1"))
        .with_action(ActionDescriptor::new(ActionId::Submit, "Approve").primary());

        assert_eq!(task.status, TaskStatus::Ready);
        assert!(task.status.is_actionable());
        assert_eq!(task.actions.len(), 1);
        assert_eq!(task.execution_id, Some(ExecutionId::new("exec-1")));
    }

    #[test]
    fn test_completed_not_actionable() {
        assert!(!TaskStatus::Completed.is_actionable());
        assert!(!TaskStatus::Cancelled.is_actionable());
        assert!(TaskStatus::Claimed.is_actionable());
    }
}
