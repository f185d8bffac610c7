use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "open" => Some(Status::Open),
            "in_progress" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared transition predicate, used by both the workflow pre-check and
/// the store. An issue cannot jump from `open` straight to `done`; every
/// other transition, including same-state no-ops, is allowed.
pub fn is_transition_allowed(current: Status, requested: Status) -> bool {
    !(current == Status::Open && requested == Status::Done)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub assigned_to: String,
    pub created_by: String,
    pub created_at: String, // ISO-8601 (RFC 3339)
}

/// User-supplied fields for a new issue; the store fills in the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assigned_to: String,
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_to_done_is_the_only_forbidden_transition() {
        let all = [Status::Open, Status::InProgress, Status::Done];
        for current in all {
            for requested in all {
                let allowed = is_transition_allowed(current, requested);
                if current == Status::Open && requested == Status::Done {
                    assert!(!allowed, "open -> done must be rejected");
                } else {
                    assert!(allowed, "{current} -> {requested} must be allowed");
                }
            }
        }
    }

    #[test]
    fn status_and_priority_round_trip_through_their_text_forms() {
        for status in [Status::Open, Status::InProgress, Status::Done] {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(Status::parse("closed"), None);
    }

    #[test]
    fn issue_serializes_with_snake_case_enum_values() {
        let issue = Issue {
            id: "abc".to_string(),
            title: "Fix login button alignment".to_string(),
            description: "Button is off by 4px".to_string(),
            priority: Priority::High,
            status: Status::InProgress,
            assigned_to: "alice@example.com".to_string(),
            created_by: "bob@example.com".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&issue).expect("serialize issue");
        assert_eq!(value["priority"], serde_json::json!("high"));
        assert_eq!(value["status"], serde_json::json!("in_progress"));
    }
}
