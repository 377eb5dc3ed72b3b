//! JWT issuance and validation
//! HMAC-SHA256 signed tokens carrying the authenticated identity claims

use crate::{
    auth::policy::Role,
    config::AppConfig,
    error::AppError,
    models::{account::Account, employee::Employee},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in issued tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account username)
    pub sub: String,

    /// Unique token identifier
    pub jti: String,

    /// Account id of the authenticated user
    pub user_id: Uuid,

    /// Employee id of the authenticated user, when the account is linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Uuid>,

    /// Access-control role, validated at issuance
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// Identity claims that handlers can request from a token.
///
/// `UserId` and `EmployeeId` are distinct identifiers: the first names the
/// account row, the second the employee row. Callers must ask for the one
/// their query actually filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityClaim {
    UserId,
    EmployeeId,
}

impl Claims {
    /// Read an identity claim, `Uuid::nil()` when absent.
    ///
    /// The nil sentinel (not an error) mirrors how callers treat a token
    /// without the claim: they must reject it explicitly.
    pub fn identity(&self, claim: IdentityClaim) -> Uuid {
        match claim {
            IdentityClaim::UserId => self.user_id,
            IdentityClaim::EmployeeId => self.employee_id.unwrap_or_else(Uuid::nil),
        }
    }
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    token_exp_secs: u64,
}

impl JwtService {
    /// Create the JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 needs at least 32 bytes of key material
        if secret.len() < 32 {
            return Err(AppError::Config(
                "JWT secret too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: config.security.issuer.clone(),
            audience: config.security.audience.clone(),
            token_exp_secs: config.security.token_exp_secs,
        })
    }

    /// Issue a token for an authenticated employee and account
    pub fn issue(&self, employee: &Employee, account: &Account) -> Result<String, AppError> {
        let role = Role::from_position(&employee.position).ok_or_else(|| {
            AppError::Validation(format!(
                "Position '{}' does not map to a known role",
                employee.position
            ))
        })?;

        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_exp_secs as i64);

        let claims = Claims {
            sub: account.username.clone(),
            jti: Uuid::new_v4().to_string(),
            user_id: account.id,
            employee_id: Some(employee.id),
            role,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Validate and decode a token
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        Ok(decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_claim_sentinel() {
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

        assert_eq!(claims.identity(IdentityClaim::EmployeeId), Uuid::nil());
        assert_ne!(claims.identity(IdentityClaim::UserId), Uuid::nil());
    }

    #[test]
    fn test_identity_claims_are_distinct() {
        let user_id = Uuid::new_v4();
        let employee_id = Uuid::new_v4();
        let claims = Claims {
            sub: "jane_d".to_string(),
            jti: Uuid::new_v4().to_string(),
            user_id,
            employee_id: Some(employee_id),
            role: Role::Manager,
            iss: "staff-service".to_string(),
            aud: "staff-service-clients".to_string(),
            iat: 0,
            exp: 0,
        };

        assert_eq!(claims.identity(IdentityClaim::UserId), user_id);
        assert_eq!(claims.identity(IdentityClaim::EmployeeId), employee_id);
    }
}
