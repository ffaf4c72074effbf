use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_not_blank, Project, ProjectId, TaskId};

/// Represents the status of a task.
///
/// Any status may be set from any other; there is no terminal state.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started. Every task starts here.
    #[default]
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must contain at least one non-whitespace character.
    #[validate(custom = "validate_not_blank")]
    pub title: String,

    /// Accepted for compatibility with older clients and ignored: new tasks always start as `TODO`.
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Body of a status change request.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// Represents a task entity as held in the store and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned from a monotonic counter.
    pub id: TaskId,
    /// The title of the task.
    pub title: String,
    /// The current status of the task.
    pub status: TaskStatus,
    /// The project containing this task. Ownership is always resolved through it.
    pub project_id: ProjectId,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last status change.
    pub updated_at: DateTime<Utc>,
}

/// A task as returned by the API, with its parent project resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    #[serde(flatten)]
    pub task: Task,
    pub project: Project,
}

/// Query parameters for listing the tasks of a project.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Keep only tasks with exactly this status.
    pub status: Option<TaskStatus>,
    /// Maximum number of tasks to return, applied after `offset`.
    pub limit: Option<usize>,
    /// Number of matching tasks to skip.
    pub offset: Option<usize>,
}

impl Task {
    /// Creates a task in the initial `Todo` state.
    pub fn new(id: TaskId, title: String, project_id: ProjectId) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            status: TaskStatus::Todo,
            project_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
    }

    /// Filters `tasks` by status, then applies `offset` and `limit`, preserving order.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}
