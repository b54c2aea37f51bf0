//! Action handler registry
//!
//! Maps action ids to async handlers. The registry is the containment
//! boundary for action failures: `execute` never returns an error, it folds
//! every failure mode into an [`ActionOutcome`] the form can render.

use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use taskform_types::{ActionContext, ActionDescriptor, ActionId, ActionOutcome, TaskFormResult};

/// Business logic behind one action id
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, context: &ActionContext) -> TaskFormResult<ActionOutcome>;
}

/// Wraps a plain async closure as an [`ActionHandler`]
struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> ActionHandler for FnHandler<F>
where
    F: Fn(ActionContext) -> Fut + Send + Sync,
    Fut: Future<Output = TaskFormResult<ActionOutcome>> + Send,
{
    async fn handle(&self, context: &ActionContext) -> TaskFormResult<ActionOutcome> {
        (self.f)(context.clone()).await
    }
}

/// Dispatch table from action id to handler
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: HashMap<ActionId, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an action id, replacing any previous one
    pub fn register(&mut self, id: impl Into<ActionId>, handler: Arc<dyn ActionHandler>) {
        let id = id.into();
        if self.handlers.insert(id.clone(), handler).is_some() {
            tracing::debug!(action = %id, "replaced action handler");
        }
    }

    /// Register an async closure as a handler
    pub fn register_fn<F, Fut>(&mut self, id: impl Into<ActionId>, f: F)
    where
        F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TaskFormResult<ActionOutcome>> + Send + 'static,
    {
        self.register(id, Arc::new(FnHandler { f }));
    }

    pub fn has_handler(&self, id: &ActionId) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for a descriptor's action
    ///
    /// Missing handlers and handler errors both come back as failed
    /// outcomes; the caller only ever branches on `outcome.success`.
    pub async fn execute(
        &self,
        descriptor: &ActionDescriptor,
        context: &ActionContext,
    ) -> ActionOutcome {
        let Some(handler) = self.handlers.get(&descriptor.id) else {
            tracing::warn!(action = %descriptor.id, "no handler registered for action");
            return ActionOutcome::failure(format!(
                "no handler registered for action '{}'",
                descriptor.id
            ));
        };

        match handler.handle(context).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(action = %descriptor.id, error = %e, "action handler failed");
                ActionOutcome::failure(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
