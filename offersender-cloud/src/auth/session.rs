//! Session JWT authentication for the management API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Session role encoded in the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tenant,
    Admin,
}

/// JWT claims for a session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account ID
    pub sub: String,
    /// Account email
    pub email: String,
    /// Resolved role at login time
    pub role: Role,
    /// Business profile ID (tenant sessions only)
    pub business_id: Option<String>,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated tenant identity extracted from a JWT
#[derive(Debug, Clone)]
pub struct TenantIdentity {
    pub account_id: String,
    pub email: String,
    pub business_id: String,
}

/// Authenticated admin identity extracted from a JWT
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub account_id: String,
    pub email: String,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a session token
pub fn create_token(
    account_id: &str,
    email: &str,
    role: Role,
    business_id: Option<&str>,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: account_id.to_string(),
        email: email.to_string(),
        role,
        business_id: business_id.map(String::from),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn decode_claims(request: &Request, secret: &str) -> Result<SessionClaims, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| error_response(401, "Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| error_response(401, "Invalid Authorization format"))?;

    let validation = Validation::default();
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        error_response(401, "Invalid or expired token")
    })
}

/// Middleware that verifies a tenant session and inserts [`TenantIdentity`]
pub async fn tenant_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let claims = decode_claims(&request, &state.jwt_secret)?;

    if claims.role != Role::Tenant {
        return Err(error_response(403, "Tenant session required"));
    }
    let business_id = claims
        .business_id
        .ok_or_else(|| error_response(403, "Session has no business profile"))?;

    request.extensions_mut().insert(TenantIdentity {
        account_id: claims.sub,
        email: claims.email,
        business_id,
    });

    Ok(next.run(request).await)
}

/// Middleware that verifies an admin session and inserts [`AdminIdentity`]
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let claims = decode_claims(&request, &state.jwt_secret)?;

    if claims.role != Role::Admin {
        return Err(error_response(403, "Admin role required"));
    }

    request.extensions_mut().insert(AdminIdentity {
        account_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

fn error_response(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    let status =
        http::StatusCode::from_u16(status).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("acct-1", "a@b.nz", Role::Tenant, Some("biz-1"), "secret")
            .unwrap();
        let decoded = jsonwebtoken::decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, "acct-1");
        assert_eq!(decoded.claims.role, Role::Tenant);
        assert_eq!(decoded.claims.business_id.as_deref(), Some("biz-1"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("acct-1", "a@b.nz", Role::Admin, None, "secret").unwrap();
        let result = jsonwebtoken::decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
