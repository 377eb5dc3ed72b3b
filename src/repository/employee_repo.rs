//! Employee repository (database access)

use crate::{error::AppError, models::employee::*};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct EmployeeRepository {
    db: PgPool,
}

impl EmployeeRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(employee)
    }

    /// Find the employee owning an account
    pub async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Employee>, AppError> {
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(&self.db)
                .await?;

        Ok(employee)
    }

    pub async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE first_name = $1 AND last_name = $2",
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.db)
        .await?;

        Ok(employee)
    }

    /// Insert an employee inside the caller's transaction
    pub async fn create_tx(
        &self,
        conn: &mut PgConnection,
        req: &CreateEmployeeRequest,
        position: &str,
        salary: f64,
        tax: f64,
    ) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (first_name, last_name, gender, age, position, salary, tax, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.gender)
        .bind(req.age)
        .bind(position)
        .bind(salary)
        .bind(tax)
        .bind(&req.category)
        .fetch_one(conn)
        .await?;

        Ok(employee)
    }

    /// Link an employee to its account inside the caller's transaction
    pub async fn link_account_tx(
        &self,
        conn: &mut PgConnection,
        employee_id: Uuid,
        account_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE employees
            SET account_id = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(employee_id)
        .bind(account_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateEmployeeRequest,
    ) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET
                first_name = $2,
                last_name = $3,
                gender = $4,
                age = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.gender)
        .bind(req.age)
        .fetch_optional(&self.db)
        .await?;

        Ok(employee)
    }

    /// List all employees with their account summary
    pub async fn list_with_accounts(&self) -> Result<Vec<EmployeeAccountRow>, AppError> {
        let rows = sqlx::query_as::<_, EmployeeAccountRow>(
            r#"
            SELECT
                e.id,
                e.first_name,
                e.last_name,
                e.gender,
                e.age,
                e.position,
                e.salary,
                e.tax,
                e.category,
                a.username,
                a.status AS account_status
            FROM employees e
            LEFT JOIN accounts a ON a.id = e.account_id
            ORDER BY e.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
