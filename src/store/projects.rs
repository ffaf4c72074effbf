use log::info;
use validator::Validate;

use super::Store;
use crate::auth::{require_ownership, Resource};
use crate::error::AppError;
use crate::models::{Project, ProjectDetails, ProjectId, ProjectInput, UserId};

impl Store {
    /// All projects owned by `owner_id`, in creation order.
    pub fn list_projects(&self, owner_id: UserId) -> Result<Vec<Project>, AppError> {
        let state = self.read()?;
        Ok(state
            .projects
            .values()
            .filter(|project| project.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    /// Creates a project owned by `owner_id`.
    pub fn create_project(&self, input: ProjectInput, owner_id: UserId) -> Result<Project, AppError> {
        input.validate()?;

        let mut state = self.write()?;
        if !state.users.contains_key(&owner_id) {
            return Err(AppError::NotFound("User not found".into()));
        }

        let project = Project::new(self.ids.next_project()?, input.name, owner_id);
        state.projects.insert(project.id, project.clone());
        info!("user {} created project {}", owner_id, project.id);
        Ok(project)
    }

    /// The project with its owner and tasks, if `caller` owns it.
    pub fn get_project(&self, id: ProjectId, caller: UserId) -> Result<ProjectDetails, AppError> {
        let state = self.read()?;
        require_ownership(Resource::Project, state.project_owner(id), caller, self.ownership)?;

        let project = state
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| Resource::Project.not_found())?;
        let owner = state
            .users
            .get(&project.owner_id)
            .map(|record| record.user.clone())
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.project_id == id)
            .cloned()
            .collect();

        Ok(ProjectDetails {
            project,
            owner,
            tasks,
        })
    }

    /// Removes a project owned by `caller`.
    ///
    /// Tasks of the project are left in place; with their parent gone they can no
    /// longer be reached through any ownership-scoped operation.
    pub fn delete_project(&self, id: ProjectId, caller: UserId) -> Result<bool, AppError> {
        let mut state = self.write()?;
        require_ownership(Resource::Project, state.project_owner(id), caller, self.ownership)?;

        state.projects.remove(&id);
        info!("user {} deleted project {}", caller, id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{store, store_with_policy, user};
    use super::*;
    use crate::auth::OwnershipPolicy;
    use crate::models::TaskInput;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    fn named(name: &str) -> ProjectInput {
        ProjectInput {
            name: name.to_string(),
        }
    }

    #[test_log::test]
    fn test_create_and_list_in_creation_order() {
        let store = store();
        let alice = user(&store, "alice");
        let bob = user(&store, "bob");

        let garden = store.create_project(named("Garden"), alice).unwrap();
        store.create_project(named("Taxes"), bob).unwrap();
        let kitchen = store.create_project(named("Kitchen"), alice).unwrap();

        assert_eq!(garden.owner_id, alice);
        let listed = store.list_projects(alice).unwrap();
        assert_eq!(listed, vec![garden, kitchen]);
        assert_eq!(store.list_projects(bob).unwrap().len(), 1);
    }

    #[test_log::test]
    fn test_blank_name_is_rejected() {
        let store = store();
        let alice = user(&store, "alice");

        assert!(matches!(
            store.create_project(named("  "), alice),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(store.project_count().unwrap(), 0);
    }

    #[test_log::test]
    fn test_owner_must_exist() {
        let store = store();
        assert_eq!(
            store.create_project(named("Garden"), 42).unwrap_err(),
            AppError::NotFound("User not found".into())
        );
    }

    #[test_log::test]
    fn test_non_owner_delete_is_hidden_as_not_found() {
        let store = store();
        let alice = user(&store, "alice");
        let bob = user(&store, "bob");
        let garden = store.create_project(named("Garden"), alice).unwrap();

        let foreign = store.delete_project(garden.id, bob).unwrap_err();
        let missing = store.delete_project(999, bob).unwrap_err();
        assert_eq!(foreign, missing);
        assert_eq!(foreign, AppError::NotFound("Project not found".into()));
        assert_eq!(store.project_count().unwrap(), 1);

        assert!(store.delete_project(garden.id, alice).unwrap());
        assert_eq!(store.project_count().unwrap(), 0);
    }

    #[test_log::test]
    fn test_reveal_policy_reports_foreign_projects_as_not_authorized() {
        let store = store_with_policy(OwnershipPolicy::Reveal);
        let alice = user(&store, "alice");
        let bob = user(&store, "bob");
        let garden = store.create_project(named("Garden"), alice).unwrap();

        assert_eq!(
            store.delete_project(garden.id, bob).unwrap_err(),
            AppError::Forbidden("Not authorized".into())
        );
        assert_eq!(
            store.delete_project(999, bob).unwrap_err(),
            AppError::NotFound("Project not found".into())
        );
    }

    #[test_log::test]
    fn test_delete_leaves_tasks_orphaned() {
        let store = store();
        let alice = user(&store, "alice");
        let garden = store.create_project(named("Garden"), alice).unwrap();
        let task = store
            .create_task(
                garden.id,
                TaskInput {
                    title: "Water plants".into(),
                    status: None,
                },
                alice,
            )
            .unwrap();

        store.delete_project(garden.id, alice).unwrap();
        assert_eq!(store.task_count().unwrap(), 1);
        assert_eq!(
            store.delete_task(task.id, alice).unwrap_err(),
            AppError::NotFound("Task not found".into())
        );
    }

    #[test_log::test]
    fn test_get_project_includes_owner_and_tasks() {
        let store = store();
        let alice = user(&store, "alice");
        let bob = user(&store, "bob");
        let garden = store.create_project(named("Garden"), alice).unwrap();
        for title in ["Water plants", "Weed beds"] {
            store
                .create_task(
                    garden.id,
                    TaskInput {
                        title: title.into(),
                        status: None,
                    },
                    alice,
                )
                .unwrap();
        }

        let details = store.get_project(garden.id, alice).unwrap();
        assert_eq!(details.project, garden);
        assert_eq!(details.owner.username, "alice");
        let titles: Vec<_> = details.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Water plants", "Weed beds"]);

        assert!(matches!(
            store.get_project(garden.id, bob),
            Err(AppError::NotFound(_))
        ));
    }

    #[test_log::test]
    fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(store());
        let alice = user(&store, "alice");

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .create_project(named(&format!("Project {}", i)), alice)
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<ProjectId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(store.list_projects(alice).unwrap().len(), 16);
    }
}
