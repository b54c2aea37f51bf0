//! Activity filters: the request shape listing calls are keyed by
//!
//! A filter set plus pagination is what the cache layer canonicalizes into a
//! cache key, so equality up to ordering matters here: two filter sets that
//! differ only in the order of their type or status lists must behave
//! identically.

use crate::{ActivityStatus, ActivityType, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter set for an activity listing request
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityFilters {
    /// Which source types to include; empty means "use the default expansion"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<ActivityType>,
    /// Which statuses to include; empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<ActivityStatus>,
    /// Restrict to a single assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Restrict to a single project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
    /// Free-text search term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only activities due before this instant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_before: Option<DateTime<Utc>>,
}

impl ActivityFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = ActivityType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_type(mut self, ty: ActivityType) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ActivityStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_due_before(mut self, due_before: DateTime<Utc>) -> Self {
        self.due_before = Some(due_before);
        self
    }

    /// True when no field narrows the result set
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.statuses.is_empty()
            && self.assignee.is_none()
            && self.project.is_none()
            && self.search.is_none()
            && self.due_before.is_none()
    }
}
