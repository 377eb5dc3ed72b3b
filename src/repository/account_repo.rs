//! Account repository (database access)

use crate::{error::AppError, models::account::*};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct AccountRepository {
    db: PgPool,
}

impl AccountRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        Ok(account)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(account)
    }

    /// Insert an account inside the caller's transaction
    pub async fn create_tx(
        &self,
        conn: &mut PgConnection,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, password_hash, status)
            VALUES ($1, $2, 'active')
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(conn)
        .await?;

        Ok(account)
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
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

    /// Rename an account after its owner's name changed
    pub async fn update_username(&self, id: Uuid, username: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET username = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(username)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all accounts with the owning employee's full name
    pub async fn list_with_owner(&self) -> Result<Vec<AccountOwnerRow>, AppError> {
        let rows = sqlx::query_as::<_, AccountOwnerRow>(
            r#"
            SELECT
                a.id,
                a.username,
                a.status,
                e.first_name || ' ' || e.last_name AS full_name
            FROM accounts a
            LEFT JOIN employees e ON e.account_id = a.id
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
