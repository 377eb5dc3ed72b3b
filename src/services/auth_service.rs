//! Authentication service: login and password change

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    credentials::CredentialStore,
    error::AppError,
    models::{account::*, auth::*, employee::EmployeeResponse},
    repository::{AccountRepository, EmployeeRepository},
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
    hasher: Arc<PasswordHasher>,
    credentials: Arc<CredentialStore>,
}

impl AuthService {
    pub fn new(
        db: PgPool,
        jwt_service: Arc<JwtService>,
        hasher: Arc<PasswordHasher>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        Self {
            db,
            jwt_service,
            hasher,
            credentials,
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown username and wrong password produce the same message so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let account_repo = AccountRepository::new(self.db.clone());
        let employee_repo = EmployeeRepository::new(self.db.clone());

        let account = account_repo
            .find_by_username(&req.username)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid username or password."))?;

        if !self.hasher.verify(&req.password, &account.password_hash) {
            tracing::debug!(username = %req.username, "Password verification failed");
            return Err(AppError::bad_request("Invalid username or password."));
        }

        if account.status() == AccountStatus::Deactivated {
            return Err(AppError::bad_request("Account is deactivated."));
        }

        let employee = employee_repo
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid username or password."))?;

        let token = self.jwt_service.issue(&employee, &account)?;

        tracing::info!(username = %account.username, "Login successful");

        Ok(LoginResponse {
            data: EmployeeResponse::from_employee(employee)
                .with_account(AccountResponse::from(account)),
            token,
            message: "Login successful.".to_string(),
        })
    }

    /// Change an account password, then drop any credential hand-off files
    /// still naming the old password. The purge is best-effort and never
    /// fails the change.
    pub async fn change_password(&self, req: ChangePasswordRequest) -> Result<(), AppError> {
        let account_repo = AccountRepository::new(self.db.clone());
        let employee_repo = EmployeeRepository::new(self.db.clone());

        let employee = employee_repo
            .find_by_id(req.employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("employee"))?;

        let account_id = employee
            .account_id
            .ok_or_else(|| AppError::not_found("account"))?;

        let account = account_repo
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("account"))?;

        if !self.hasher.verify(&req.old_password, &account.password_hash) {
            return Err(AppError::bad_request("Old password is incorrect."));
        }

        let new_hash = self.hasher.hash(&req.new_password);
        account_repo.update_password(account.id, &new_hash).await?;

        // The on-disk record now names a stale password; remove it.
        self.credentials.purge(&account.username);

        tracing::info!(username = %account.username, "Password changed");

        Ok(())
    }
}
