//! Employee domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Employee record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: i16,
    /// Position doubles as the access-control role; validated against the
    /// known role names at creation
    pub position: String,
    pub salary: f64,
    pub tax: f64,
    pub category: String,
    /// Linked account, nullable during creation
    pub account_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create employee request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(length(min = 1, max = 1))]
    pub gender: String,
    #[validate(range(min = 16, max = 100))]
    pub age: i16,
    #[validate(length(min = 1, max = 32))]
    pub position: String,
    #[validate(length(min = 1, max = 32))]
    pub category: String,
}

/// Update employee request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(length(min = 1, max = 1))]
    pub gender: String,
    #[validate(range(min = 16, max = 100))]
    pub age: i16,
}

/// Employee response with account summary
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: i16,
    pub position: String,
    pub salary: f64,
    pub tax: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<crate::models::account::AccountResponse>,
}

impl EmployeeResponse {
    pub fn from_employee(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            gender: employee.gender,
            age: employee.age,
            position: employee.position,
            salary: employee.salary,
            tax: employee.tax,
            category: employee.category,
            account: None,
        }
    }

    pub fn with_account(mut self, account: crate::models::account::AccountResponse) -> Self {
        self.account = Some(account);
        self
    }
}

/// Employee list row joined with the account summary
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EmployeeAccountRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: i16,
    pub position: String,
    pub salary: f64,
    pub tax: f64,
    pub category: String,
    pub username: Option<String>,
    pub account_status: Option<String>,
}

/// Salary and tax are fixed by position
pub fn salary_and_tax_for_position(position: &str) -> (f64, f64) {
    match position {
        "Developer" => (20000.0, 20000.0 * 0.25),
        "Manager" => (30000.0, 30000.0 * 0.35),
        _ => (10000.0, 10000.0 * 0.15),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_and_tax() {
        assert_eq!(salary_and_tax_for_position("Developer"), (20000.0, 5000.0));
        assert_eq!(salary_and_tax_for_position("Manager"), (30000.0, 10500.0));
        assert_eq!(salary_and_tax_for_position("Admin"), (10000.0, 1500.0));
        assert_eq!(salary_and_tax_for_position("Employee"), (10000.0, 1500.0));
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreateEmployeeRequest {
            first_name: "".to_string(),
            last_name: "Doe".to_string(),
            gender: "F".to_string(),
            age: 30,
            position: "Developer".to_string(),
            category: "Permanent".to_string(),
        };
        assert!(validator::Validate::validate(&req).is_err());
    }
}
