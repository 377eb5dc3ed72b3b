//! Task service: assignment and lifecycle transitions

use crate::{
    error::AppError,
    models::task::*,
    repository::{EmployeeRepository, TaskRepository},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TaskService {
    db: PgPool,
}

impl TaskService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a pending task and its assignment row in one transaction.
    ///
    /// `assigned_by_id` comes from the caller's employee claim; the nil
    /// sentinel means the token carried no employee identity.
    pub async fn assign(
        &self,
        req: AssignTaskRequest,
        assigned_by_id: Uuid,
    ) -> Result<TaskAssignment, AppError> {
        if assigned_by_id.is_nil() {
            return Err(AppError::bad_request("Invalid employee id."));
        }

        let employee_repo = EmployeeRepository::new(self.db.clone());
        if employee_repo.find_by_id(req.assigned_to_id).await?.is_none() {
            return Err(AppError::not_found("assignee"));
        }

        let task_repo = TaskRepository::new(self.db.clone());

        let mut tx = self.db.begin().await?;

        let task = task_repo.create_tx(&mut *tx, &req.task_name).await?;
        let assignment = task_repo
            .create_assignment_tx(&mut *tx, task.id, req.assigned_to_id, assigned_by_id)
            .await?;

        tx.commit().await?;

        tracing::info!(
            task_id = %task.id,
            assigned_to = %req.assigned_to_id,
            assigned_by = %assigned_by_id,
            "Task assigned"
        );

        Ok(assignment)
    }

    /// Move a task to Started. Completed is terminal.
    pub async fn start(&self, task_id: Uuid) -> Result<(), AppError> {
        self.transition(task_id, TaskStatus::Started).await
    }

    /// Move a task to Completed. Completed is terminal.
    pub async fn complete(&self, task_id: Uuid) -> Result<(), AppError> {
        self.transition(task_id, TaskStatus::Completed).await
    }

    async fn transition(&self, task_id: Uuid, target: TaskStatus) -> Result<(), AppError> {
        let task_repo = TaskRepository::new(self.db.clone());

        let task = task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::not_found("task"))?;

        if task.status().is_terminal() {
            return Err(AppError::bad_request("Task is already completed."));
        }

        task_repo.set_status(task_id, target).await?;

        tracing::info!(task_id = %task_id, status = %target, "Task status updated");

        Ok(())
    }
}
