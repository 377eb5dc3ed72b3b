//! Super-admin bootstrap seeding
//!
//! Fixed ids so the seed is idempotent across restarts. The password comes
//! from config and is stored hashed; when no bootstrap password is
//! configured, seeding is skipped.

use crate::{auth::password::PasswordHasher, config::AppConfig, error::AppError};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use uuid::Uuid;

const SUPER_ADMIN_EMPLOYEE_ID: Uuid = Uuid::from_u128(0x11111111_1111_1111_1111_111111111111);
const SUPER_ADMIN_ACCOUNT_ID: Uuid = Uuid::from_u128(0x22222222_2222_2222_2222_222222222222);
const SUPER_ADMIN_USERNAME: &str = "SuperAdmin@001";

/// Seed the super-admin employee and account if absent
pub async fn seed_super_admin(
    db: &PgPool,
    config: &AppConfig,
    hasher: &PasswordHasher,
) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
        .bind(SUPER_ADMIN_EMPLOYEE_ID)
        .fetch_one(db)
        .await?;

    if exists {
        tracing::debug!("Super admin already seeded");
        return Ok(());
    }

    let Some(admin_password) = &config.bootstrap.admin_password else {
        tracing::warn!(
            "No bootstrap admin password configured and no super admin exists; skipping seed"
        );
        return Ok(());
    };

    let password_hash = hasher.hash(admin_password.expose_secret());

    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO accounts (id, username, password_hash, status)
        VALUES ($1, $2, $3, 'active')
        "#,
    )
    .bind(SUPER_ADMIN_ACCOUNT_ID)
    .bind(SUPER_ADMIN_USERNAME)
    .bind(&password_hash)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO employees
            (id, first_name, last_name, gender, age, position, salary, tax, category, account_id)
        VALUES ($1, 'John', 'Doe', 'M', 35, 'Admin', 50000, 5000, 'Permanent', $2)
        "#,
    )
    .bind(SUPER_ADMIN_EMPLOYEE_ID)
    .bind(SUPER_ADMIN_ACCOUNT_ID)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(username = SUPER_ADMIN_USERNAME, "Super admin seeded");

    Ok(())
}
