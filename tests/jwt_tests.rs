//! JWT service unit tests
//!
//! Token issuance, claim round-trips and validation failures

use chrono::Utc;
use secrecy::Secret;
use staff_service::auth::jwt::{Claims, IdentityClaim, JwtService};
use staff_service::auth::policy::Role;
use staff_service::config::{
    AppConfig, BootstrapConfig, CredentialsConfig, DatabaseConfig, LoggingConfig, SecurityConfig,
    ServerConfig,
};
use staff_service::models::{account::Account, employee::Employee};
use uuid::Uuid;

fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:3000".to_string(),
            graceful_shutdown_timeout_secs: 30,
        },
        database: DatabaseConfig {
            url: Secret::new("postgresql://localhost/test".to_string()),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
            pepper: Secret::new("test_pepper_16_chars_min".to_string()),
            token_exp_secs: 86400,
            issuer: "staff-service".to_string(),
            audience: "staff-service-clients".to_string(),
        },
        credentials: CredentialsConfig {
            directory: "employee_credentials".to_string(),
        },
        bootstrap: BootstrapConfig {
            admin_password: None,
        },
    }
}

fn test_employee(position: &str) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        gender: "F".to_string(),
        age: 30,
        position: position.to_string(),
        salary: 20000.0,
        tax: 5000.0,
        category: "Permanent".to_string(),
        account_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_account(username: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password_hash: "irrelevant".to_string(),
        status: "active".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_issue_and_validate_round_trip() {
    let service = JwtService::from_config(&create_test_config()).unwrap();
    let employee = test_employee("Admin");
    let account = test_account("Doe_Jane@abc");

    let token = service.issue(&employee, &account).unwrap();
    let claims = service.validate(&token).unwrap();

    assert_eq!(claims.sub, "Doe_Jane@abc");
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.user_id, account.id);
    assert_eq!(claims.employee_id, Some(employee.id));
    assert!(!claims.jti.is_empty());
}

#[test]
fn test_token_expiry_matches_config() {
    let service = JwtService::from_config(&create_test_config()).unwrap();
    let token = service
        .issue(&test_employee("Developer"), &test_account("dev"))
        .unwrap();

    let claims = service.validate(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 86400);
}

#[test]
fn test_tokens_have_unique_ids() {
    let service = JwtService::from_config(&create_test_config()).unwrap();
    let employee = test_employee("Manager");
    let account = test_account("mgr");

    let token1 = service.issue(&employee, &account).unwrap();
    let token2 = service.issue(&employee, &account).unwrap();

    // Per-call nonce: tokens for the same identity never collide
    assert_ne!(token1, token2);
    let jti1 = service.validate(&token1).unwrap().jti;
    let jti2 = service.validate(&token2).unwrap().jti;
    assert_ne!(jti1, jti2);
}

#[test]
fn test_unknown_position_rejected_at_issuance() {
    let service = JwtService::from_config(&create_test_config()).unwrap();
    let result = service.issue(&test_employee("Astronaut"), &test_account("astro"));

    assert!(result.is_err());
}

#[test]
fn test_secret_too_short() {
    let mut config = create_test_config();
    config.security.jwt_secret = Secret::new("short".to_string());

    assert!(JwtService::from_config(&config).is_err());
}

#[test]
fn test_invalid_token_fails() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    assert!(service.validate("not-a-token").is_err());
    assert!(service.validate("").is_err());
}

#[test]
fn test_token_from_other_issuer_rejected() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let mut other_config = create_test_config();
    other_config.security.issuer = "someone-else".to_string();
    let other_service = JwtService::from_config(&other_config).unwrap();

    let token = other_service
        .issue(&test_employee("Admin"), &test_account("admin"))
        .unwrap();

    assert!(service.validate(&token).is_err());
}

#[test]
fn test_token_signed_with_other_key_rejected() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let mut other_config = create_test_config();
    other_config.security.jwt_secret =
        Secret::new("another_secret_key_32_characters!!".to_string());
    let other_service = JwtService::from_config(&other_config).unwrap();

    let token = other_service
        .issue(&test_employee("Admin"), &test_account("admin"))
        .unwrap();

    assert!(service.validate(&token).is_err());
}

#[test]
fn test_missing_employee_claim_yields_nil_sentinel() {
    let claims = Claims {
        sub: "jane_d".to_string(),
        jti: Uuid::new_v4().to_string(),
        user_id: Uuid::new_v4(),
        employee_id: None,
        role: Role::Developer,
        iss: "staff-service".to_string(),
        aud: "staff-service-clients".to_string(),
        iat: 0,
        exp: 0,
    };

    // Absent claim reads as the nil sentinel, not an error
    assert_eq!(claims.identity(IdentityClaim::EmployeeId), Uuid::nil());
}
