//! Cache key canonicalization
//!
//! Keys must be deterministic: two filter sets that are deeply equal up to
//! the ordering of their list fields must produce the same key, and any
//! differing field value must produce a different key. Fields are emitted in
//! a fixed sorted order and list values are sorted before joining.

use activity_types::ActivityFilters;

/// Serialize a filter set into its canonical string form
///
/// The output is also what type-scoped invalidation substring-matches
/// against, so type tokens appear verbatim (`types=schedule+ticket`).
pub fn canonical_filter_string(filters: &ActivityFilters) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(assignee) = &filters.assignee {
        parts.push(format!("assignee={assignee}"));
    }
    if let Some(due_before) = &filters.due_before {
        parts.push(format!("due_before={}", due_before.to_rfc3339()));
    }
    if let Some(project) = &filters.project {
        parts.push(format!("project={project}"));
    }
    if let Some(search) = &filters.search {
        parts.push(format!("search={search}"));
    }
    if !filters.statuses.is_empty() {
        let mut statuses: Vec<&str> = filters.statuses.iter().map(|s| s.as_str()).collect();
        statuses.sort_unstable();
        statuses.dedup();
        parts.push(format!("statuses={}", statuses.join("+")));
    }
    if !filters.types.is_empty() {
        let mut types: Vec<&str> = filters.types.iter().map(|t| t.as_str()).collect();
        types.sort_unstable();
        types.dedup();
        parts.push(format!("types={}", types.join("+")));
    }

    parts.join("&")
}

/// Derive the cache key for a (filters, page, page size) tuple
pub fn generate_cache_key(filters: &ActivityFilters, page: u32, page_size: u32) -> String {
    format!(
        "{}|page={}|size={}",
        canonical_filter_string(filters),
        page,
        page_size
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_types::{ActivityStatus, ActivityType, ProjectId};
    use chrono::Utc;

    #[test]
    fn test_key_is_order_insensitive() {
        let a = ActivityFilters::new()
            .with_types([ActivityType::Ticket, ActivityType::Schedule])
            .with_statuses([ActivityStatus::New, ActivityStatus::Waiting]);
        let b = ActivityFilters::new()
            .with_types([ActivityType::Schedule, ActivityType::Ticket])
            .with_statuses([ActivityStatus::Waiting, ActivityStatus::New]);

        assert_eq!(generate_cache_key(&a, 1, 25), generate_cache_key(&b, 1, 25));
    }

    #[test]
    fn test_key_differs_on_any_field() {
        let base = ActivityFilters::new()
            .with_type(ActivityType::Ticket)
            .with_assignee("dana");
        let key = generate_cache_key(&base, 1, 25);

        let other_assignee = base.clone().with_assignee("kai");
        // with_assignee replaces the option
        assert_ne!(key, generate_cache_key(&other_assignee, 1, 25));

        let other_type = ActivityFilters::new()
            .with_type(ActivityType::Schedule)
            .with_assignee("dana");
        assert_ne!(key, generate_cache_key(&other_type, 1, 25));

        let with_project = base.clone().with_project(ProjectId::new("p-1"));
        assert_ne!(key, generate_cache_key(&with_project, 1, 25));

        let with_due = base.clone().with_due_before(Utc::now());
        assert_ne!(key, generate_cache_key(&with_due, 1, 25));
    }

    #[test]
    fn test_key_differs_on_pagination() {
        let filters = ActivityFilters::new().with_type(ActivityType::Ticket);
        let key = generate_cache_key(&filters, 1, 25);
        assert_ne!(key, generate_cache_key(&filters, 2, 25));
        assert_ne!(key, generate_cache_key(&filters, 1, 50));
    }

    #[test]
    fn test_type_tokens_appear_verbatim() {
        let filters = ActivityFilters::new()
            .with_types([ActivityType::WorkflowTask, ActivityType::TimeEntry]);
        let key = generate_cache_key(&filters, 1, 10);
        assert!(key.contains("types=time_entry+workflow_task"));
    }

    #[test]
    fn test_empty_filters_key() {
        let key = generate_cache_key(&ActivityFilters::new(), 1, 25);
        assert_eq!(key, "|page=1|size=25");
    }

    #[test]
    fn test_duplicate_list_values_collapse() {
        let a = ActivityFilters::new().with_types([ActivityType::Ticket, ActivityType::Ticket]);
        let b = ActivityFilters::new().with_type(ActivityType::Ticket);
        assert_eq!(generate_cache_key(&a, 1, 25), generate_cache_key(&b, 1, 25));
    }
}
