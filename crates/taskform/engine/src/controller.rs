//! Form controller: the stateful heart of one open form
//!
//! Owns the live values, re-runs the visibility evaluator on every change,
//! and routes action clicks through the registry (or an injected override).

use crate::{ActionRegistry, ConditionalEvaluator};
use serde_json::Value;
use std::sync::Arc;
use taskform_types::{
    sort_actions, ActionContext, ActionDescriptor, ActionId, ActionOutcome, ExecutionId,
    FormSchema, FormValues, TaskFormResult, TaskId, UiHints,
};

/// Submission lifecycle of the form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting edits
    #[default]
    Idle,
    /// An action handler is running; further triggers are rejected
    Submitting,
    /// The last action failed; edits clear this back to `Idle`
    Error,
}

/// Intercepts actions before they reach the registry
///
/// Embedders use this to reroute built-in actions (a host page that wants
/// `submit` to go through its own pipeline) while leaving the rest of the
/// form machinery untouched.
#[async_trait::async_trait]
pub trait ActionOverride: Send + Sync {
    async fn on_action(
        &self,
        descriptor: &ActionDescriptor,
        context: &ActionContext,
    ) -> TaskFormResult<ActionOutcome>;
}

/// Drives one schema-defined form from open to submit
pub struct FormController {
    schema: FormSchema,
    hints: UiHints,
    values: FormValues,
    actions: Vec<ActionDescriptor>,
    evaluator: ConditionalEvaluator,
    registry: ActionRegistry,
    task_id: Option<TaskId>,
    execution_id: Option<ExecutionId>,
    context_data: Option<Value>,
    action_override: Option<Arc<dyn ActionOverride>>,
    phase: FormPhase,
    last_error: Option<String>,
    // Derived visible subtree, refreshed on every value change.
    visible: (FormSchema, UiHints),
}

impl FormController {
    pub fn new(schema: FormSchema, hints: UiHints, registry: ActionRegistry) -> Self {
        let evaluator = ConditionalEvaluator::new();
        let values = Self::seed_defaults(&schema, FormValues::new());
        let visible = evaluator.apply(&schema, &hints, &values);
        Self {
            schema,
            hints,
            values,
            actions: Vec::new(),
            evaluator,
            registry,
            task_id: None,
            execution_id: None,
            context_data: None,
            action_override: None,
            phase: FormPhase::Idle,
            last_error: None,
            visible,
        }
    }

    pub fn with_values(mut self, values: FormValues) -> Self {
        self.values = Self::seed_defaults(&self.schema, values);
        self.refresh();
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionDescriptor>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_evaluator(mut self, evaluator: ConditionalEvaluator) -> Self {
        self.evaluator = evaluator;
        self.refresh();
        self
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

    pub fn with_action_override(mut self, action_override: Arc<dyn ActionOverride>) -> Self {
        self.action_override = Some(action_override);
        self
    }

    /// Schema defaults fill gaps only; stored values always win
    fn seed_defaults(schema: &FormSchema, mut values: FormValues) -> FormValues {
        for (name, field) in &schema.properties {
            if let Some(default) = &field.default {
                if !values.contains(name) {
                    values.set(name.clone(), default.clone());
                }
            }
        }
        values
    }

    fn refresh(&mut self) {
        self.visible = self.evaluator.apply(&self.schema, &self.hints, &self.values);
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The schema subtree currently visible
    pub fn visible_schema(&self) -> &FormSchema {
        &self.visible.0
    }

    /// The hints for currently visible fields
    pub fn visible_hints(&self) -> &UiHints {
        &self.visible.1
    }

    /// All current values, including those of hidden fields
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Render-ready action list: hidden filtered out, primary first
    pub fn actions(&self) -> Vec<ActionDescriptor> {
        sort_actions(&self.actions)
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Record one field edit and re-derive visibility
    ///
    /// Hidden fields keep their values; only the visible subtree changes.
    /// An edit also clears a prior error state.
    pub fn set_value(&mut self, field: impl Into<String>, value: Value) {
        self.values.set(field, value);
        if self.phase == FormPhase::Error {
            self.phase = FormPhase::Idle;
            self.last_error = None;
        }
        self.refresh();
    }

    /// Trigger an action by id
    ///
    /// Routes through the override when one is installed, otherwise the
    /// registry. All failure modes surface as a failed outcome; the phase
    /// machine tracks the rest.
    pub async fn trigger(&mut self, action_id: &ActionId) -> ActionOutcome {
        if self.phase == FormPhase::Submitting {
            return ActionOutcome::failure("an action is already in progress");
        }
        let Some(descriptor) = self
            .actions
            .iter()
            .find(|a| &a.id == action_id && !a.hidden)
            .cloned()
        else {
            return ActionOutcome::failure(format!("unknown action '{action_id}'"));
        };
        if descriptor.disabled {
            return ActionOutcome::failure(format!("action '{action_id}' is disabled"));
        }

        self.phase = FormPhase::Submitting;
        tracing::debug!(action = %action_id, "triggering form action");

        let mut context = ActionContext::new(self.values.clone());
        context.task_id = self.task_id.clone();
        context.execution_id = self.execution_id.clone();
        context.context_data = self.context_data.clone();

        let outcome = match &self.action_override {
            Some(action_override) => match action_override.on_action(&descriptor, &context).await {
                Ok(outcome) => outcome,
                Err(e) => ActionOutcome::failure(e.to_string()),
            },
            None => self.registry.execute(&descriptor, &context).await,
        };

        if outcome.success {
            self.phase = FormPhase::Idle;
            self.last_error = None;
        } else {
            self.phase = FormPhase::Error;
            self.last_error = outcome.message.clone();
            tracing::warn!(
                action = %action_id,
                error = outcome.message.as_deref().unwrap_or("<no message>"),
                "form action failed"
            );
        }
        outcome
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("task_id", &self.task_id)
            .field("phase", &self.phase)
            .field("fields", &self.schema.properties.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskform_types::{DisplayIf, FieldHint, FieldSchema, TaskFormError};

    fn contact_controller(registry: ActionRegistry) -> FormController {
        let schema = FormSchema::new("Contact")
            .with_field(
                "contact_method",
                FieldSchema::select("Contact method", ["email", "phone"])
                    .with_default(json!("email")),
            )
            .with_field("email", FieldSchema::text("Email address"))
            .with_field("phone", FieldSchema::text("Phone number"));
        let hints = UiHints::new()
            .with_hint(
                "email",
                FieldHint::new().with_display_if(DisplayIf::equals("contact_method", json!("email"))),
            )
            .with_hint(
                "phone",
                FieldHint::new().with_display_if(DisplayIf::equals("contact_method", json!("phone"))),
            );
        FormController::new(schema, hints, registry).with_actions(vec![
            ActionDescriptor::new(ActionId::Submit, "Submit").primary(),
            ActionDescriptor::new(ActionId::Cancel, "Cancel").with_order(1),
            ActionDescriptor::new("audit", "Audit").hidden(),
        ])
    }

    #[test]
    fn test_defaults_seed_initial_visibility() {
        let controller = contact_controller(ActionRegistry::new());
        assert_eq!(controller.value("contact_method"), Some(&json!("email")));
        assert!(controller.visible_schema().has_field("email"));
        assert!(!controller.visible_schema().has_field("phone"));
    }

    #[test]
    fn test_set_value_rederives_visibility_and_keeps_hidden_values() {
        let mut controller = contact_controller(ActionRegistry::new());
        controller.set_value("email", json!("kai@example.com"));
        controller.set_value("contact_method", json!("phone"));

        assert!(!controller.visible_schema().has_field("email"));
        assert!(controller.visible_schema().has_field("phone"));
        // The hidden field keeps its value.
        assert_eq!(controller.value("email"), Some(&json!("kai@example.com")));
    }

    #[test]
    fn test_stored_values_win_over_defaults() {
        let controller = contact_controller(ActionRegistry::new())
            .with_values(FormValues::new().with("contact_method", json!("phone")));
        assert_eq!(controller.value("contact_method"), Some(&json!("phone")));
        assert!(controller.visible_schema().has_field("phone"));
    }

    #[test]
    fn test_actions_sorted_and_hidden_excluded() {
        let controller = contact_controller(ActionRegistry::new());
        let actions = controller.actions();
        let ids: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["submit", "cancel"]);
    }

    #[tokio::test]
    async fn test_trigger_success_returns_to_idle() {
        let mut registry = ActionRegistry::new();
        registry.register_fn(ActionId::Submit, |_context| async {
            Ok(ActionOutcome::ok())
        });
        let mut controller = contact_controller(registry);

        let outcome = controller.trigger(&ActionId::Submit).await;
        assert!(outcome.success);
        assert_eq!(controller.phase(), FormPhase::Idle);
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_trigger_failure_enters_error_and_edit_clears_it() {
        let mut registry = ActionRegistry::new();
        registry.register_fn(ActionId::Submit, |_context| async {
            Err(TaskFormError::HandlerFailed("boom".to_string()))
        });
        let mut controller = contact_controller(registry);

        let outcome = controller.trigger(&ActionId::Submit).await;
        assert!(!outcome.success);
        assert_eq!(controller.phase(), FormPhase::Error);
        assert_eq!(controller.last_error(), Some("boom"));

        controller.set_value("email", json!("kai@example.com"));
        assert_eq!(controller.phase(), FormPhase::Idle);
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_trigger_unknown_or_hidden_action_fails() {
        let mut controller = contact_controller(ActionRegistry::new());

        let outcome = controller.trigger(&ActionId::custom("nope")).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("unknown action 'nope'"));

        // Hidden actions cannot be triggered either.
        let outcome = controller.trigger(&ActionId::custom("audit")).await;
        assert!(!outcome.success);
        assert_eq!(controller.phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn test_trigger_disabled_action_fails() {
        let mut controller = contact_controller(ActionRegistry::new()).with_actions(vec![
            ActionDescriptor::new(ActionId::Submit, "Submit").disabled(),
        ]);
        let outcome = controller.trigger(&ActionId::Submit).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("action 'submit' is disabled"));
    }

    #[tokio::test]
    async fn test_override_intercepts_registry() {
        struct Reroute;

        #[async_trait::async_trait]
        impl ActionOverride for Reroute {
            async fn on_action(
                &self,
                _descriptor: &ActionDescriptor,
                _context: &ActionContext,
            ) -> TaskFormResult<ActionOutcome> {
                Ok(ActionOutcome::ok_with_message("rerouted"))
            }
        }

        let mut registry = ActionRegistry::new();
        registry.register_fn(ActionId::Submit, |_context| async {
            Ok(ActionOutcome::ok_with_message("registry"))
        });
        let mut controller = contact_controller(registry).with_action_override(Arc::new(Reroute));

        let outcome = controller.trigger(&ActionId::Submit).await;
        assert_eq!(outcome.message.as_deref(), Some("rerouted"));
    }

    #[tokio::test]
    async fn test_context_carries_task_and_form_data() {
        let mut registry = ActionRegistry::new();
        registry.register_fn(ActionId::Submit, |context: ActionContext| async move {
            match (&context.task_id, context.form_data.get("email")) {
                (Some(task_id), Some(_)) => {
                    Ok(ActionOutcome::ok_with_message(task_id.to_string()))
                }
                _ => Err(TaskFormError::MissingTaskId),
            }
        });
        let mut controller =
            contact_controller(registry).with_task_id(TaskId::new("task-9"));
        controller.set_value("email", json!("kai@example.com"));

        let outcome = controller.trigger(&ActionId::Submit).await;
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("task-9"));
    }
}
