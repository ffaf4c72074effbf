use log::{debug, info};
use validator::Validate;

use super::Store;
use crate::auth::{require_ownership, Resource};
use crate::error::AppError;
use crate::models::{
    ProjectId, Task, TaskId, TaskInput, TaskQuery, TaskResponse, TaskStatus, UserId,
};

impl Store {
    /// Tasks of a project owned by `caller`, filtered and windowed by `query`.
    pub fn list_tasks(
        &self,
        project_id: ProjectId,
        caller: UserId,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, AppError> {
        let state = self.read()?;
        require_ownership(
            Resource::Project,
            state.project_owner(project_id),
            caller,
            self.ownership,
        )?;

        Ok(query.apply(
            state
                .tasks
                .values()
                .filter(|task| task.project_id == project_id),
        ))
    }

    /// Adds a task to a project owned by `caller`. New tasks always start as `Todo`.
    pub fn create_task(
        &self,
        project_id: ProjectId,
        input: TaskInput,
        caller: UserId,
    ) -> Result<Task, AppError> {
        input.validate()?;
        if let Some(status) = input.status.filter(|status| *status != TaskStatus::Todo) {
            debug!("ignoring initial status {:?} for new task", status);
        }

        let mut state = self.write()?;
        require_ownership(
            Resource::Project,
            state.project_owner(project_id),
            caller,
            self.ownership,
        )?;

        let task = Task::new(self.ids.next_task()?, input.title, project_id);
        state.tasks.insert(task.id, task.clone());
        info!("user {} created task {} in project {}", caller, task.id, project_id);
        Ok(task)
    }

    /// Sets a task's status. Every status is reachable from every other.
    pub fn update_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        caller: UserId,
    ) -> Result<Task, AppError> {
        let mut state = self.write()?;
        require_ownership(Resource::Task, state.task_owner(task_id), caller, self.ownership)?;

        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| Resource::Task.not_found())?;
        let previous = task.status;
        task.set_status(status);
        debug!("task {} moved from {:?} to {:?}", task_id, previous, status);
        Ok(task.clone())
    }

    /// Removes a task whose project is owned by `caller`.
    pub fn delete_task(&self, task_id: TaskId, caller: UserId) -> Result<bool, AppError> {
        let mut state = self.write()?;
        require_ownership(Resource::Task, state.task_owner(task_id), caller, self.ownership)?;

        state.tasks.remove(&task_id);
        info!("user {} deleted task {}", caller, task_id);
        Ok(true)
    }

    /// Attaches the parent project to a task returned by one of the operations above.
    pub fn with_project(&self, task: Task) -> Result<TaskResponse, AppError> {
        self.read()?.task_response(task)
    }

    /// Attaches the parent project to each task, in order.
    pub fn with_projects(&self, tasks: Vec<Task>) -> Result<Vec<TaskResponse>, AppError> {
        let state = self.read()?;
        tasks
            .into_iter()
            .map(|task| state.task_response(task))
            .collect()
    }
}
