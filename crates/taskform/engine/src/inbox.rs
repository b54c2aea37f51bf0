//! Task inbox: list/claim/submit operations with cache coherence
//!
//! Workflow tasks also surface in the cached activity lists, so every
//! state-changing call here invalidates the cache's workflow-task entries.
//! Invalidation failures are logged and swallowed; a stale list entry is
//! preferable to failing the state change that already happened.

use crate::TaskService;
use activity_cache::{ActivityCache, InvalidationScope};
use activity_types::ActivityType;
use std::sync::Arc;
use taskform_types::{FormValues, TaskFormResult, TaskId, WorkflowTask};

/// The task list surface, bound to the activity cache it must keep honest
pub struct TaskInbox {
    service: Arc<dyn TaskService>,
    cache: Option<Arc<ActivityCache>>,
}

impl TaskInbox {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self {
            service,
            cache: None,
        }
    }

    /// Bind the activity cache so task state changes evict its
    /// workflow-task entries
    pub fn with_cache(mut self, cache: Arc<ActivityCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// List tasks visible to an assignee (all tasks when `None`)
    pub async fn list(&self, assignee: Option<&str>) -> TaskFormResult<Vec<WorkflowTask>> {
        self.service.list_tasks(assignee).await
    }

    /// Claim a task for a user
    pub async fn claim(&self, task_id: &TaskId, assignee: &str) -> TaskFormResult<()> {
        self.service.claim(task_id, assignee).await?;
        tracing::info!(task = %task_id, assignee, "task claimed");
        self.invalidate_task_lists();
        Ok(())
    }

    /// Release a claimed task back to the pool
    pub async fn unclaim(&self, task_id: &TaskId) -> TaskFormResult<()> {
        self.service.unclaim(task_id).await?;
        tracing::info!(task = %task_id, "task released");
        self.invalidate_task_lists();
        Ok(())
    }

    /// Submit final form data for a task
    pub async fn submit(&self, task_id: &TaskId, values: &FormValues) -> TaskFormResult<()> {
        self.service.submit_form(task_id, values).await?;
        tracing::info!(task = %task_id, "task form submitted");
        self.invalidate_task_lists();
        Ok(())
    }

    fn invalidate_task_lists(&self) {
        let Some(cache) = &self.cache else {
            return;
        };
        match cache.invalidate(InvalidationScope::Type(ActivityType::WorkflowTask)) {
            Ok(removed) => {
                tracing::debug!(removed, "invalidated cached workflow-task lists");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to invalidate cached workflow-task lists");
            }
        }
    }
}
