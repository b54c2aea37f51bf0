//! Task-form sessions: a controller bound to a workflow task
//!
//! `TaskFormSession::open` fetches the task, wires the built-in actions
//! (submit, save draft, cancel) to the task service, and hands back a
//! ready-to-render [`FormController`].

use crate::{ActionRegistry, FormController};
use async_trait::async_trait;
use std::sync::Arc;
use taskform_types::{
    ActionId, ActionOutcome, FormValues, TaskFormError, TaskFormResult, TaskId, WorkflowTask,
};

/// The workflow-engine collaborator behind the form layer
///
/// Implementations talk to whatever backs human tasks; everything above this
/// trait is transport-agnostic.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Fetch one task with its form contract
    async fn fetch_task(&self, task_id: &TaskId) -> TaskFormResult<WorkflowTask>;

    /// Submit final form data, completing the task
    async fn submit_form(&self, task_id: &TaskId, values: &FormValues) -> TaskFormResult<()>;

    /// Persist form data without completing the task
    async fn save_draft(&self, task_id: &TaskId, values: &FormValues) -> TaskFormResult<()>;

    /// Claim an unclaimed task for a user
    async fn claim(&self, task_id: &TaskId, assignee: &str) -> TaskFormResult<()>;

    /// Release a claimed task back to the pool
    async fn unclaim(&self, task_id: &TaskId) -> TaskFormResult<()>;

    /// List tasks visible to an assignee (all tasks when `None`)
    async fn list_tasks(&self, assignee: Option<&str>) -> TaskFormResult<Vec<WorkflowTask>>;
}

/// Opens forms for workflow tasks
pub struct TaskFormSession;

impl TaskFormSession {
    /// Fetch the task and build a controller wired to the service
    ///
    /// Built-in wiring: `submit` calls `submit_form`, `save_draft` calls
    /// `save_draft`, `cancel` succeeds locally without a service call.
    /// Custom actions stay unbound; callers extend the registry through
    /// [`Self::open_with_registry`].
    pub async fn open(
        service: Arc<dyn TaskService>,
        task_id: &TaskId,
    ) -> TaskFormResult<FormController> {
        Self::open_with_registry(service, task_id, ActionRegistry::new()).await
    }

    /// Like [`Self::open`], but seeded with caller-registered handlers
    ///
    /// Built-in wiring overrides any caller handler registered under the
    /// same built-in id.
    pub async fn open_with_registry(
        service: Arc<dyn TaskService>,
        task_id: &TaskId,
        mut registry: ActionRegistry,
    ) -> TaskFormResult<FormController> {
        let task = service.fetch_task(task_id).await?;
        tracing::debug!(task = %task.id, name = %task.name, "opening task form");

        let submit_service = service.clone();
        registry.register_fn(ActionId::Submit, move |context| {
            let service = submit_service.clone();
            async move {
                let task_id = context.task_id.ok_or(TaskFormError::MissingTaskId)?;
                service.submit_form(&task_id, &context.form_data).await?;
                Ok(ActionOutcome::ok())
            }
        });

        let draft_service = service.clone();
        registry.register_fn(ActionId::SaveDraft, move |context| {
            let service = draft_service.clone();
            async move {
                let task_id = context.task_id.ok_or(TaskFormError::MissingTaskId)?;
                service.save_draft(&task_id, &context.form_data).await?;
                Ok(ActionOutcome::ok_with_message("draft saved"))
            }
        });

        registry.register_fn(ActionId::Cancel, |_context| async {
            Ok(ActionOutcome::ok())
        });

        let mut controller = FormController::new(task.schema, task.ui_hints, registry)
            .with_values(task.values)
            .with_actions(task.actions)
            .with_task_id(task.id);
        if let Some(execution_id) = task.execution_id {
            controller = controller.with_execution_id(execution_id);
        }
        Ok(controller)
    }
}
