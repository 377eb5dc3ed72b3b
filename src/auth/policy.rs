//! Role hierarchy and named authorization policies
//!
//! The policy table is fixed at compile time. Roles come from the employee
//! position, validated at creation and token issuance; unknown positions are
//! rejected instead of flowing into tokens as free-form strings.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Access-control role derived from the employee position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    Developer,
    /// Any other recognized position; carries no endpoint privileges
    Employee,
}

impl Role {
    /// Parse an employee position into a role. Unknown positions are
    /// rejected so they never reach a token claim.
    pub fn from_position(position: &str) -> Option<Role> {
        match position.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "developer" => Some(Role::Developer),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Developer => "Developer",
            Role::Employee => "Employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named authorization policy attached to an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    RequireAdmin,
    RequireManager,
    RequireDeveloper,
    RequireEmployee,
}

impl Policy {
    /// Roles accepted by this policy
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Policy::RequireAdmin => &[Role::Admin],
            Policy::RequireManager => &[Role::Manager, Role::Admin],
            Policy::RequireDeveloper | Policy::RequireEmployee => {
                &[Role::Developer, Role::Manager, Role::Admin]
            }
        }
    }

    pub fn allows(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// Check the role against this policy, `Forbidden` on denial
    pub fn authorize(self, role: Role) -> Result<(), AppError> {
        if self.allows(role) {
            Ok(())
        } else {
            tracing::warn!(policy = ?self, role = %role, "Policy denied request");
            Err(AppError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_position("Admin"), Some(Role::Admin));
        assert_eq!(Role::from_position("manager"), Some(Role::Manager));
        assert_eq!(Role::from_position(" Developer "), Some(Role::Developer));
        assert_eq!(Role::from_position("Employee"), Some(Role::Employee));
        assert_eq!(Role::from_position("Intern"), None);
        assert_eq!(Role::from_position(""), None);
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        for policy in [
            Policy::RequireAdmin,
            Policy::RequireManager,
            Policy::RequireDeveloper,
            Policy::RequireEmployee,
        ] {
            assert!(policy.allows(Role::Admin));
        }
    }

    #[test]
    fn test_developer_access() {
        assert!(!Policy::RequireAdmin.allows(Role::Developer));
        assert!(!Policy::RequireManager.allows(Role::Developer));
        assert!(Policy::RequireDeveloper.allows(Role::Developer));
        assert!(Policy::RequireEmployee.allows(Role::Developer));
    }

    #[test]
    fn test_manager_access() {
        assert!(!Policy::RequireAdmin.allows(Role::Manager));
        assert!(Policy::RequireManager.allows(Role::Manager));
        assert!(Policy::RequireDeveloper.allows(Role::Manager));
        assert!(Policy::RequireEmployee.allows(Role::Manager));
    }

    #[test]
    fn test_other_employees_denied() {
        for policy in [
            Policy::RequireAdmin,
            Policy::RequireManager,
            Policy::RequireDeveloper,
            Policy::RequireEmployee,
        ] {
            assert!(!policy.allows(Role::Employee));
        }
    }

    #[test]
    fn test_authorize_maps_to_forbidden() {
        let err = Policy::RequireAdmin.authorize(Role::Developer).unwrap_err();
        assert_eq!(err.code(), 403);
    }
}
