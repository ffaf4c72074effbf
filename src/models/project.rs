use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_not_blank, ProjectId, Task, User, UserId};

/// A named container of tasks, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier, assigned from a monotonic counter.
    pub id: ProjectId,
    /// Display name. Never blank.
    pub name: String,
    /// The user who created the project. Only this user may see or change it.
    pub owner_id: UserId,
    /// Timestamp of when the project was created.
    pub created_at: DateTime<Utc>,
}

/// Input structure for creating a project.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectInput {
    /// The name of the project. Must contain at least one non-whitespace character.
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}

/// A project as returned by the API, with its owner resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    pub owner: User,
}

/// A single project with its owner and every task it contains, in creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: Project,
    pub owner: User,
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(id: ProjectId, name: String, owner_id: UserId) -> Self {
        Self {
            id,
            name,
            owner_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}
