//! Authentication endpoints: signup, login

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::Business;
use shared::plans::{PlanId, plan_by_id};

use crate::auth::session::{Role, create_token};
use crate::auth::{Principal, resolve_principal};
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::{hash_password, new_id, verify_password};

use super::ApiResult;

/// POST /api/auth/signup
#[derive(Deserialize)]
pub struct SignupRequest {
    pub business_name: String,
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<SessionResponse> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Invalid email address").into());
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }
    let business_name = req.business_name.trim();
    if business_name.is_empty() {
        return Err(AppError::validation("Business name required").into());
    }

    if db::accounts::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::AlreadyExists).into());
    }

    let hashed = hash_password(&req.password)?;

    let now = shared::util::now_millis();
    let account_id = new_id();
    let business_id = new_id();
    let plan = plan_by_id(PlanId::Basic);

    db::accounts::create(&state.pool, &account_id, &email, &hashed, now).await?;
    db::businesses::create(
        &state.pool,
        &business_id,
        &account_id,
        business_name,
        plan.id.as_db(),
        plan.sms_included,
        now,
    )
    .await?;

    tracing::info!(%business_id, "New business signed up");

    session_response(&state, &account_id, &email).await
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<SessionResponse> {
    let email = req.email.trim().to_lowercase();
    let account = db::accounts::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &account.hashed_password) {
        return Err(AppError::invalid_credentials().into());
    }

    session_response(&state, &account.id, &account.email).await
}

/// Resolve the principal and mint a session token for it.
async fn session_response(
    state: &AppState,
    account_id: &str,
    email: &str,
) -> ApiResult<SessionResponse> {
    let principal = resolve_principal(&state.pool, account_id, email).await?;

    let (role, business) = match principal {
        Principal::Admin { .. } => (Role::Admin, None),
        Principal::Tenant(business) => (Role::Tenant, Some(business)),
    };

    let token = create_token(
        account_id,
        email,
        role,
        business.as_ref().map(|b| b.id.as_str()),
        &state.jwt_secret,
    )
    .map_err(|e| ServiceError::Db(e.into()))?;

    Ok(Json(SessionResponse {
        token,
        role,
        business,
    }))
}
