//! Employee service: creation with generated credentials, profile updates

use crate::{
    auth::password::PasswordHasher,
    auth::policy::Role,
    credentials::CredentialStore,
    error::AppError,
    models::{account::*, employee::*},
    repository::{AccountRepository, EmployeeRepository},
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct EmployeeService {
    db: PgPool,
    hasher: Arc<PasswordHasher>,
    credentials: Arc<CredentialStore>,
}

impl EmployeeService {
    pub fn new(db: PgPool, hasher: Arc<PasswordHasher>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            db,
            hasher,
            credentials,
        }
    }

    /// Create an employee with a linked account and generated credentials.
    ///
    /// Employee insert, account insert and linkage run in one transaction.
    /// The credential hand-off file is written only after commit, outside the
    /// transaction, so a file write failure can never roll back the account.
    pub async fn create(&self, req: CreateEmployeeRequest) -> Result<EmployeeResponse, AppError> {
        let employee_repo = EmployeeRepository::new(self.db.clone());
        let account_repo = AccountRepository::new(self.db.clone());

        let role = Role::from_position(&req.position).ok_or_else(|| {
            AppError::Validation(format!(
                "Position '{}' does not map to a known role",
                req.position
            ))
        })?;
        let position = role.as_str();

        if let Some(existing) = employee_repo
            .find_by_name(&req.first_name, &req.last_name)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "Employee {} {} already exists.",
                existing.first_name, existing.last_name
            )));
        }

        let (salary, tax) = salary_and_tax_for_position(position);

        let password = CredentialStore::generate_password(12);
        let password_hash = self.hasher.hash(&password);

        let mut tx = self.db.begin().await?;

        let employee = employee_repo
            .create_tx(&mut *tx, &req, position, salary, tax)
            .await?;

        let username = derive_username(&employee.last_name, &employee.first_name, employee.id);

        let account = account_repo
            .create_tx(&mut *tx, &username, &password_hash)
            .await?;

        employee_repo
            .link_account_tx(&mut *tx, employee.id, account.id)
            .await?;

        tx.commit().await?;

        tracing::info!(
            employee_id = %employee.id,
            username = %account.username,
            "Employee and account created"
        );

        // Fire-and-forget side record with the plaintext for hand-off
        self.credentials
            .persist(&employee.full_name(), &account.username, &password);

        Ok(EmployeeResponse::from_employee(employee).with_account(AccountResponse::from(account)))
    }

    /// Update an employee profile; a name change renames the account too
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateEmployeeRequest,
    ) -> Result<Employee, AppError> {
        let employee_repo = EmployeeRepository::new(self.db.clone());
        let account_repo = AccountRepository::new(self.db.clone());

        let existing = employee_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("employee"))?;

        let name_changed =
            existing.first_name != req.first_name || existing.last_name != req.last_name;

        let employee = employee_repo
            .update(id, &req)
            .await?
            .ok_or_else(|| AppError::not_found("employee"))?;

        if name_changed {
            if let Some(account_id) = employee.account_id {
                let username =
                    derive_username(&employee.last_name, &employee.first_name, employee.id);
                account_repo.update_username(account_id, &username).await?;
                tracing::info!(employee_id = %employee.id, username = %username, "Account renamed");
            }
        }

        Ok(employee)
    }
}

/// Username scheme: `{last}_{first}@{first 3 chars of the employee id}`
fn derive_username(last_name: &str, first_name: &str, employee_id: Uuid) -> String {
    let id = employee_id.to_string();
    format!("{}_{}@{}", last_name, first_name, &id[..3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_username() {
        let id = Uuid::parse_str("abc1d2e3-0000-0000-0000-000000000000").unwrap();
        assert_eq!(derive_username("Doe", "Jane", id), "Doe_Jane@abc");
    }
}
