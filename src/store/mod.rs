//!
//! # In-memory entity store
//!
//! `Store` owns every user, project and task of a running server. It is created
//! once in `main` (or once per test), wrapped in `web::Data` and injected into each
//! handler, so no entity state is process-global.
//!
//! All collections sit behind one `RwLock`. Each mutating operation performs its
//! whole check-then-write sequence under a single write guard, which makes every
//! create, update and delete atomic with respect to concurrent requests. Ids come
//! from atomic counters and are never derived from collection sizes.
//!
//! The operations are grouped by entity in `identity`, `projects` and `tasks`.

mod identity;
mod projects;
mod tasks;

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::{OwnershipPolicy, Resource, TokenService};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{Project, ProjectId, Task, TaskId, TaskResponse, User, UserId};

/// A registered user together with the credential hash that never leaves the store.
#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: String,
}

/// Every collection guarded by the store lock.
///
/// `BTreeMap` keyed by monotonically assigned ids iterates in insertion order.
#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, UserRecord>,
    usernames: HashMap<String, UserId>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
}

impl StoreState {
    /// The owner of `project_id`, or `None` if the project does not exist.
    fn project_owner(&self, project_id: ProjectId) -> Option<UserId> {
        self.projects.get(&project_id).map(|project| project.owner_id)
    }

    /// Resolves a task's effective owner through its parent project.
    ///
    /// `None` if the task is unknown or its project has been deleted.
    fn task_owner(&self, task_id: TaskId) -> Option<UserId> {
        self.tasks
            .get(&task_id)
            .and_then(|task| self.project_owner(task.project_id))
    }

    /// Pairs `task` with its parent project; `NotFound` if the project is gone.
    fn task_response(&self, task: Task) -> Result<TaskResponse, AppError> {
        let project = self
            .projects
            .get(&task.project_id)
            .cloned()
            .ok_or_else(|| Resource::Project.not_found())?;
        Ok(TaskResponse { task, project })
    }
}

/// Collision-free id generator, one counter per entity kind. Ids start at 1.
#[derive(Debug, Default)]
struct IdSequence {
    users: AtomicI32,
    projects: AtomicI32,
    tasks: AtomicI32,
}

impl IdSequence {
    /// Fails once the counter reaches `i32::MAX`; the counter never wraps.
    fn next(counter: &AtomicI32, kind: &str) -> Result<i32, AppError> {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| AppError::InternalServerError(format!("{} ids exhausted", kind)))
    }

    fn next_user(&self) -> Result<UserId, AppError> {
        Self::next(&self.users, "User")
    }

    fn next_project(&self) -> Result<ProjectId, AppError> {
        Self::next(&self.projects, "Project")
    }

    fn next_task(&self) -> Result<TaskId, AppError> {
        Self::next(&self.tasks, "Task")
    }
}

/// The repository of users, projects and tasks.
pub struct Store {
    state: RwLock<StoreState>,
    ids: IdSequence,
    tokens: TokenService,
    password_cost: u32,
    ownership: OwnershipPolicy,
}

impl Store {
    /// Creates an empty store.
    ///
    /// * `tokens` - signs and verifies session tokens.
    /// * `password_cost` - bcrypt cost used when registering users.
    /// * `ownership` - how foreign-owned projects and tasks are reported.
    pub fn new(tokens: TokenService, password_cost: u32, ownership: OwnershipPolicy) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            ids: IdSequence::default(),
            tokens,
            password_cost,
            ownership,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TokenService::new(&config.jwt_secret, config.token_ttl_hours),
            config.bcrypt_cost,
            config.ownership_policy,
        )
    }

    pub fn user_count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.users.len())
    }

    pub fn project_count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.projects.len())
    }

    pub fn task_count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.tasks.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, AppError> {
        self.state
            .read()
            .map_err(|e| AppError::InternalServerError(format!("Store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, AppError> {
        self.state
            .write()
            .map_err(|e| AppError::InternalServerError(format!("Store lock poisoned: {}", e)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_id_sequence_is_monotonic_per_kind() {
        let ids = IdSequence::default();
        assert_eq!(ids.next_user().unwrap(), 1);
        assert_eq!(ids.next_user().unwrap(), 2);
        assert_eq!(ids.next_project().unwrap(), 1);
        assert_eq!(ids.next_task().unwrap(), 1);
        assert_eq!(ids.next_project().unwrap(), 2);
    }

    #[test]
    fn test_id_sequence_stops_at_max_without_wrapping() {
        let ids = IdSequence {
            tasks: AtomicI32::new(i32::MAX - 1),
            ..IdSequence::default()
        };

        assert_eq!(ids.next_task().unwrap(), i32::MAX);
        for _ in 0..2 {
            assert_eq!(
                ids.next_task().unwrap_err(),
                AppError::InternalServerError("Task ids exhausted".into())
            );
        }
        assert_eq!(ids.next_user().unwrap(), 1);
    }

    #[test]
    fn test_id_sequence_has_no_collisions_across_threads() {
        let ids = Arc::new(IdSequence::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || {
                    (0..100)
                        .map(|_| ids.next_task().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<TaskId> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
        assert_eq!(all.first(), Some(&1));
        assert_eq!(all.last(), Some(&800));
    }
}
