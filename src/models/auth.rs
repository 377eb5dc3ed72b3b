//! Authentication request/response models

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::employee::EmployeeResponse;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response: profile plus the signed token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub data: EmployeeResponse,
    pub token: String,
    pub message: String,
}

/// Change password request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub employee_id: Uuid,
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}
