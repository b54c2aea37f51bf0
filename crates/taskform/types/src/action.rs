//! Action descriptors, ids, and the handler protocol types
//!
//! Actions are what a user can do to a form. The descriptor carries display
//! metadata; the id is the dispatch key into the handler registry; the
//! context/outcome pair is the whole protocol between the generic engine and
//! business-specific handlers.

use crate::{ExecutionId, FormValues, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Action Id ────────────────────────────────────────────────────────

/// Dispatch key for a form action
///
/// The built-in ids are a closed set with stable string forms; `Custom`
/// keeps caller-defined workflow actions expressible without giving up
/// compile-time safety on the known cases.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionId {
    /// Persist final form data against the task
    Submit,
    /// Persist without finalizing
    SaveDraft,
    /// Discard the form
    Cancel,
    /// A caller-defined action
    Custom(String),
}

impl ActionId {
    pub fn as_str(&self) -> &str {
        match self {
            ActionId::Submit => "submit",
            ActionId::SaveDraft => "save_draft",
            ActionId::Cancel => "cancel",
            ActionId::Custom(id) => id,
        }
    }

    pub fn custom(id: impl Into<String>) -> Self {
        ActionId::Custom(id.into())
    }
}

impl From<String> for ActionId {
    fn from(s: String) -> Self {
        match s.as_str() {
            "submit" => ActionId::Submit,
            "save_draft" => ActionId::SaveDraft,
            "cancel" => ActionId::Cancel,
            _ => ActionId::Custom(s),
        }
    }
}

impl From<ActionId> for String {
    fn from(id: ActionId) -> Self {
        id.as_str().to_string()
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        ActionId::from(s.to_string())
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Action Descriptor ────────────────────────────────────────────────

/// Visual style of an action button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionVariant {
    Primary,
    #[default]
    Secondary,
    Danger,
    Ghost,
}

/// Metadata describing one user-triggerable operation on a form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Dispatch key
    pub id: ActionId,
    /// Button label
    pub label: String,
    /// Primary actions render first, ahead of any order weight
    #[serde(default)]
    pub primary: bool,
    /// Visual style
    #[serde(default)]
    pub variant: ActionVariant,
    /// A disabled action renders but cannot be triggered
    #[serde(default)]
    pub disabled: bool,
    /// Ordering weight among actions of the same primacy (ascending)
    #[serde(default)]
    pub order: i32,
    /// Confirmation prompt shown before the handler runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<String>,
    /// A hidden action is excluded entirely, not merely disabled
    #[serde(default)]
    pub hidden: bool,
}

impl ActionDescriptor {
    pub fn new(id: impl Into<ActionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            primary: false,
            variant: ActionVariant::default(),
            disabled: false,
            order: 0,
            confirm: None,
            hidden: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self.variant = ActionVariant::Primary;
        self
    }

    pub fn with_variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_confirm(mut self, prompt: impl Into<String>) -> Self {
        self.confirm = Some(prompt.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Filter out hidden actions and sort the rest for rendering:
/// primary first, then ascending order weight
pub fn sort_actions(actions: &[ActionDescriptor]) -> Vec<ActionDescriptor> {
    let mut visible: Vec<ActionDescriptor> =
        actions.iter().filter(|a| !a.hidden).cloned().collect();
    visible.sort_by_key(|a| (!a.primary, a.order));
    visible
}

// ── Context & Outcome ────────────────────────────────────────────────

/// The bundle handed to an action handler
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionContext {
    /// Current form values at the moment of the click
    pub form_data: FormValues,
    /// The workflow task the form belongs to, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// The workflow execution the task belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<ExecutionId>,
    /// Arbitrary caller-supplied context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_data: Option<Value>,
}

impl ActionContext {
    pub fn new(form_data: FormValues) -> Self {
        Self {
            form_data,
            task_id: None,
            execution_id: None,
            context_data: None,
        }
    }

    pub fn with_task_id(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn with_execution_id(mut self, execution_id: ExecutionId) -> Self {
        self.execution_id = Some(execution_id);
        self
    }

    pub fn with_context_data(mut self, data: Value) -> Self {
        self.context_data = Some(data);
        self
    }
}

/// Uniform result returned from action execution
///
/// Handlers never let errors escape the registry boundary; failures arrive
/// here as `success = false` with the error's message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_id_string_forms() {
        assert_eq!(ActionId::Submit.as_str(), "submit");
        assert_eq!(ActionId::SaveDraft.as_str(), "save_draft");
        assert_eq!(ActionId::Cancel.as_str(), "cancel");
        assert_eq!(ActionId::custom("escalate").as_str(), "escalate");
    }

    #[test]
    fn test_action_id_from_string() {
        assert_eq!(ActionId::from("submit"), ActionId::Submit);
        assert_eq!(ActionId::from("save_draft"), ActionId::SaveDraft);
        assert_eq!(ActionId::from("escalate"), ActionId::custom("escalate"));
    }

    #[test]
    fn test_action_id_serde_as_string() {
        let json = serde_json::to_value(ActionId::SaveDraft).unwrap();
        assert_eq!(json, json!("save_draft"));
        let back: ActionId = serde_json::from_value(json!("cancel")).unwrap();
        assert_eq!(back, ActionId::Cancel);
    }

    #[test]
    fn test_sort_primary_first_then_order() {
        let actions = vec![
            ActionDescriptor::new("b", "B").with_order(1),
            ActionDescriptor::new("a", "A").primary().with_order(5),
            ActionDescriptor::new("c", "C").with_order(0),
        ];
        let sorted = sort_actions(&actions);
        let ids: Vec<&str> = sorted.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_sort_excludes_hidden() {
        let actions = vec![
            ActionDescriptor::new("keep", "Keep"),
            ActionDescriptor::new("gone", "Gone").hidden(),
        ];
        let sorted = sort_actions(&actions);
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].id.as_str(), "keep");
    }

    #[test]
    fn test_outcome_constructors() {
        assert!(ActionOutcome::ok().success);
        let failed = ActionOutcome::failure("boom");
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_context_builders() {
        let context = ActionContext::new(FormValues::new().with("email", json!("a@b.c")))
            .with_task_id(TaskId::new("task-1"))
            .with_context_data(json!({"source": "inbox"}));
        assert_eq!(context.task_id, Some(TaskId::new("task-1")));
        assert!(context.execution_id.is_none());
        assert!(context.context_data.is_some());
    }
}
