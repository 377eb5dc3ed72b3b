//! Authorization policy tests
//!
//! Exercises the full role/policy table

use staff_service::auth::policy::{Policy, Role};

const ALL_POLICIES: [Policy; 4] = [
    Policy::RequireAdmin,
    Policy::RequireManager,
    Policy::RequireDeveloper,
    Policy::RequireEmployee,
];

#[test]
fn test_admin_has_full_access() {
    for policy in ALL_POLICIES {
        assert!(policy.allows(Role::Admin), "{:?} must allow Admin", policy);
    }
}

#[test]
fn test_manager_denied_admin_only_endpoints() {
    assert!(!Policy::RequireAdmin.allows(Role::Manager));
    assert!(Policy::RequireManager.allows(Role::Manager));
    assert!(Policy::RequireDeveloper.allows(Role::Manager));
    assert!(Policy::RequireEmployee.allows(Role::Manager));
}

#[test]
fn test_developer_scope() {
    assert!(!Policy::RequireAdmin.allows(Role::Developer));
    assert!(!Policy::RequireManager.allows(Role::Developer));
    assert!(Policy::RequireDeveloper.allows(Role::Developer));
    assert!(Policy::RequireEmployee.allows(Role::Developer));
}

#[test]
fn test_other_employees_have_no_endpoint_access() {
    for policy in ALL_POLICIES {
        assert!(!policy.allows(Role::Employee), "{:?} must deny Employee", policy);
    }
}

#[test]
fn test_denial_is_forbidden_not_unauthorized() {
    let err = Policy::RequireManager
        .authorize(Role::Developer)
        .unwrap_err();
    assert_eq!(err.code(), 403);
}

#[test]
fn test_role_parsing_rejects_unknown_positions() {
    assert_eq!(Role::from_position("Admin"), Some(Role::Admin));
    assert_eq!(Role::from_position("MANAGER"), Some(Role::Manager));
    assert_eq!(Role::from_position("developer"), Some(Role::Developer));
    assert_eq!(Role::from_position("employee"), Some(Role::Employee));

    assert_eq!(Role::from_position("Contractor"), None);
    assert_eq!(Role::from_position("admin; drop table"), None);
    assert_eq!(Role::from_position(""), None);
}
