//! Task domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub status: String, // pending, started, completed
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task status state machine: Pending -> Started -> Completed, with
/// Completed terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Started,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Started => "started",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "started" => TaskStatus::Started,
            "completed" => TaskStatus::Completed,
            _ => TaskStatus::Pending,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from(self.status.clone())
    }
}

/// Assignment row linking a task to the assignee and the assigner
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskAssignment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub assigned_to_id: Uuid,
    pub assigned_by_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Assign task request
#[derive(Debug, Deserialize, Validate)]
pub struct AssignTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub task_name: String,
    pub assigned_to_id: Uuid,
}

/// Task as seen by its assignee, with the assigner's name
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AssignedTaskRow {
    pub task_id: Uuid,
    pub task_name: String,
    pub status: String,
    pub assigned_by_first_name: String,
    pub assigned_by_last_name: String,
}

/// Task as seen by its assigner, with the assignee's name
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct IssuedTaskRow {
    pub task_id: Uuid,
    pub task_name: String,
    pub status: String,
    pub assigned_to_full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [TaskStatus::Pending, TaskStatus::Started, TaskStatus::Completed] {
            assert_eq!(TaskStatus::from(status.as_str().to_string()), status);
        }
    }

    #[test]
    fn test_completed_is_terminal() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Started.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
    }
}
