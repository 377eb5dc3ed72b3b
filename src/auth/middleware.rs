//! JWT authentication middleware

use crate::{
    auth::jwt::{IdentityClaim, JwtService},
    auth::policy::Role,
    error::AppError,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated identity attached to request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    /// `Uuid::nil()` when the token carried no employee claim
    pub employee_id: Uuid,
    pub username: String,
    pub role: Role,
}

// FromRequestParts so handlers can take AuthContext directly
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .ok_or(AppError::Unauthorized)
}

/// JWT authentication middleware. Rejects with 401 before any policy check
/// runs; policy evaluation happens in the handlers against the role claim.
pub async fn jwt_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let claims = jwt_service.validate(&token)?;

    let auth_context = AuthContext {
        user_id: claims.identity(IdentityClaim::UserId),
        employee_id: claims.identity(IdentityClaim::EmployeeId),
        username: claims.sub,
        role: claims.role,
    };

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
