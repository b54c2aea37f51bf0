//! Activity records: the normalized work-item union
//!
//! Every variant carries the common [`ActivityBase`] (id, title, status,
//! priority, assignees, audit timestamps, permitted actions) plus the fields
//! specific to its source system. Records are snapshots; the client never
//! mutates them in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for an activity
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub String);

impl ActivityId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a project
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Activity Type ────────────────────────────────────────────────────

/// The source type of an activity — the discriminant of the record union
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// A calendar/schedule entry
    Schedule,
    /// A task belonging to a project plan
    ProjectTask,
    /// A service-desk ticket
    Ticket,
    /// A logged time entry
    TimeEntry,
    /// A human task emitted by the workflow engine
    WorkflowTask,
}

impl ActivityType {
    /// Every known type, in canonical order
    pub fn all() -> [ActivityType; 5] {
        [
            ActivityType::Schedule,
            ActivityType::ProjectTask,
            ActivityType::Ticket,
            ActivityType::TimeEntry,
            ActivityType::WorkflowTask,
        ]
    }

    /// The stable string form used in cache keys and wire payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Schedule => "schedule",
            ActivityType::ProjectTask => "project_task",
            ActivityType::Ticket => "ticket",
            ActivityType::TimeEntry => "time_entry",
            ActivityType::WorkflowTask => "workflow_task",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityType {
    type Err = crate::ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "schedule" => Ok(ActivityType::Schedule),
            "project_task" => Ok(ActivityType::ProjectTask),
            "ticket" => Ok(ActivityType::Ticket),
            "time_entry" => Ok(ActivityType::TimeEntry),
            "workflow_task" => Ok(ActivityType::WorkflowTask),
            other => Err(crate::ActivityError::UnknownActivityType(other.to_string())),
        }
    }
}

// ── Status & Priority ────────────────────────────────────────────────

/// Display status shared by all activity variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    New,
    InProgress,
    Waiting,
    Completed,
    Cancelled,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::New => "new",
            ActivityStatus::InProgress => "in_progress",
            ActivityStatus::Waiting => "waiting",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the activity still needs attention
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            ActivityStatus::New | ActivityStatus::InProgress | ActivityStatus::Waiting
        )
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority shared by all activity variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

// ── Activity Base ────────────────────────────────────────────────────

/// Fields common to every activity variant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityBase {
    /// Unique identifier
    pub id: ActivityId,
    /// Display title
    pub title: String,
    /// Current status
    pub status: ActivityStatus,
    /// Priority
    pub priority: Priority,
    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Assigned user names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    /// When the record was created (server time)
    pub created_at: DateTime<Utc>,
    /// When the record was last updated (server time)
    pub updated_at: DateTime<Utc>,
    /// Action identifiers the current user may trigger on this record
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permitted_actions: Vec<String>,
}

impl ActivityBase {
    pub fn new(id: ActivityId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            status: ActivityStatus::New,
            priority: Priority::Medium,
            due_at: None,
            assignees: Vec::new(),
            created_at: now,
            updated_at: now,
            permitted_actions: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ActivityStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignees.push(assignee.into());
        self
    }

    pub fn with_permitted_action(mut self, action: impl Into<String>) -> Self {
        self.permitted_actions.push(action.into());
        self
    }
}

// ── Activity Record ──────────────────────────────────────────────────

/// One normalized activity — the union dashboards render
///
/// The serde tag doubles as the source type, so a deserialized record can
/// never disagree with its discriminant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityRecord {
    /// A calendar/schedule entry
    Schedule {
        #[serde(flatten)]
        base: ActivityBase,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    /// A task on a project plan
    ProjectTask {
        #[serde(flatten)]
        base: ActivityBase,
        project_id: ProjectId,
        #[serde(skip_serializing_if = "Option::is_none")]
        estimated_minutes: Option<u32>,
        percent_complete: u8,
    },
    /// A service-desk ticket
    Ticket {
        #[serde(flatten)]
        base: ActivityBase,
        ticket_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        queue: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        billable_minutes: Option<u32>,
    },
    /// A logged time entry
    TimeEntry {
        #[serde(flatten)]
        base: ActivityBase,
        work_date: DateTime<Utc>,
        billable_minutes: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    /// A human task emitted by the workflow engine
    WorkflowTask {
        #[serde(flatten)]
        base: ActivityBase,
        execution_id: String,
        workflow_name: String,
    },
}

impl ActivityRecord {
    /// The discriminant of this record
    pub fn activity_type(&self) -> ActivityType {
        match self {
            ActivityRecord::Schedule { .. } => ActivityType::Schedule,
            ActivityRecord::ProjectTask { .. } => ActivityType::ProjectTask,
            ActivityRecord::Ticket { .. } => ActivityType::Ticket,
            ActivityRecord::TimeEntry { .. } => ActivityType::TimeEntry,
            ActivityRecord::WorkflowTask { .. } => ActivityType::WorkflowTask,
        }
    }

    /// The common base shared by every variant
    pub fn base(&self) -> &ActivityBase {
        match self {
            ActivityRecord::Schedule { base, .. }
            | ActivityRecord::ProjectTask { base, .. }
            | ActivityRecord::Ticket { base, .. }
            | ActivityRecord::TimeEntry { base, .. }
            | ActivityRecord::WorkflowTask { base, .. } => base,
        }
    }

    pub fn id(&self) -> &ActivityId {
        &self.base().id
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    pub fn status(&self) -> ActivityStatus {
        self.base().status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ticket() -> ActivityRecord {
        ActivityRecord::Ticket {
            base: ActivityBase::new(ActivityId::new("t-1"), "Printer on fire")
                .with_status(ActivityStatus::InProgress)
                .with_priority(Priority::High)
                .with_assignee("dana")
                .with_permitted_action("resolve"),
            ticket_number: "T20260815.0042".to_string(),
            queue: Some("Support".to_string()),
            billable_minutes: Some(30),
        }
    }

    #[test]
    fn test_activity_type_roundtrip() {
        for ty in ActivityType::all() {
            let parsed: ActivityType = ty.as_str().parse().unwrap();
            assert_eq!(parsed, ty);
        }
        assert!("gadget".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_discriminant_matches_variant() {
        let ticket = make_ticket();
        assert_eq!(ticket.activity_type(), ActivityType::Ticket);
        assert_eq!(ticket.id(), &ActivityId::new("t-1"));
        assert_eq!(ticket.title(), "Printer on fire");
        assert_eq!(ticket.status(), ActivityStatus::InProgress);
    }

    #[test]
    fn test_serde_tag_is_source_type() {
        let ticket = make_ticket();
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["type"], "ticket");
        assert_eq!(json["ticket_number"], "T20260815.0042");
        // Flattened base fields sit at the top level
        assert_eq!(json["title"], "Printer on fire");

        let back: ActivityRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, ticket);
    }

    #[test]
    fn test_status_is_open() {
        assert!(ActivityStatus::New.is_open());
        assert!(ActivityStatus::Waiting.is_open());
        assert!(!ActivityStatus::Completed.is_open());
        assert!(!ActivityStatus::Cancelled.is_open());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_base_builders() {
        let base = ActivityBase::new(ActivityId::generate(), "Weekly sync")
            .with_due_at(Utc::now())
            .with_assignee("kai")
            .with_assignee("ren");
        assert_eq!(base.assignees.len(), 2);
        assert!(base.due_at.is_some());
        assert_eq!(base.status, ActivityStatus::New);
    }
}
