//! Task repository (database access)

use crate::{error::AppError, models::task::*};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct TaskRepository {
    db: PgPool,
}

impl TaskRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(task)
    }

    /// Insert a pending task inside the caller's transaction
    pub async fn create_tx(&self, conn: &mut PgConnection, name: &str) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, status)
            VALUES ($1, 'pending')
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(conn)
        .await?;

        Ok(task)
    }

    /// Insert the assignment row inside the caller's transaction
    pub async fn create_assignment_tx(
        &self,
        conn: &mut PgConnection,
        task_id: Uuid,
        assigned_to_id: Uuid,
        assigned_by_id: Uuid,
    ) -> Result<TaskAssignment, AppError> {
        let assignment = sqlx::query_as::<_, TaskAssignment>(
            r#"
            INSERT INTO task_assignments (task_id, assigned_to_id, assigned_by_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(task_id)
        .bind(assigned_to_id)
        .bind(assigned_by_id)
        .fetch_one(conn)
        .await?;

        Ok(assignment)
    }

    pub async fn set_status(&self, id: Uuid, status: TaskStatus) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Open tasks assigned to an employee, with the assigner's name
    pub async fn list_assigned_to(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<AssignedTaskRow>, AppError> {
        let rows = sqlx::query_as::<_, AssignedTaskRow>(
            r#"
            SELECT
                t.id AS task_id,
                t.name AS task_name,
                t.status,
                b.first_name AS assigned_by_first_name,
                b.last_name AS assigned_by_last_name
            FROM task_assignments ta
            JOIN tasks t ON t.id = ta.task_id
            JOIN employees b ON b.id = ta.assigned_by_id
            WHERE ta.assigned_to_id = $1 AND t.status <> 'completed'
            ORDER BY ta.created_at DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Tasks an employee has assigned to others, with the assignee's name
    pub async fn list_assigned_by(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<IssuedTaskRow>, AppError> {
        let rows = sqlx::query_as::<_, IssuedTaskRow>(
            r#"
            SELECT
                t.id AS task_id,
                t.name AS task_name,
                t.status,
                e.first_name || ' ' || e.last_name AS assigned_to_full_name
            FROM task_assignments ta
            JOIN tasks t ON t.id = ta.task_id
            JOIN employees e ON e.id = ta.assigned_to_id
            WHERE ta.assigned_by_id = $1
            ORDER BY ta.created_at DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
