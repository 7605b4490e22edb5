//! Account endpoints: profile, password change, plan change

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Business;
use shared::plans::{Plan, PlanId, plan_by_id, pricing_plans};

use crate::auth::TenantIdentity;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::super::ApiResult;

async fn load_business(state: &AppState, identity: &TenantIdentity) -> ServiceResult<Business> {
    let business = db::businesses::find_by_id(&state.pool, &identity.business_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;
    Ok(business)
}

/// GET /api/tenant/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<serde_json::Value> {
    let business = load_business(&state, &identity).await?;
    let plan = plan_by_id(business.plan());

    Ok(Json(serde_json::json!({
        "business": business,
        "plan": plan,
        "plans": pricing_plans(),
    })))
}

/// PUT /api/tenant/profile
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<serde_json::Value> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Business name must not be empty").into());
    }

    db::businesses::update_name(&state.pool, &identity.business_id, name).await?;

    Ok(Json(serde_json::json!({ "message": "Profile updated" })))
}

/// POST /api/tenant/change-password
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    if req.new_password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }

    let account = db::accounts::find_by_id(&state.pool, &identity.account_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotFound))?;

    if !verify_password(&req.current_password, &account.hashed_password) {
        return Err(AppError::invalid_credentials().into());
    }

    let hashed = hash_password(&req.new_password)?;
    db::accounts::update_password(&state.pool, &identity.account_id, &hashed).await?;

    Ok(Json(serde_json::json!({ "message": "Password updated" })))
}

/// POST /api/tenant/plan
#[derive(Deserialize)]
pub struct ChangePlanRequest {
    pub plan_id: String,
}

/// Resolve a raw plan id against the catalog. The resolved plan's
/// `sms_included` is what becomes the business's new `sms_limit`.
fn resolve_plan(plan_id: &str) -> Result<Plan, AppError> {
    let id = PlanId::from_db(plan_id).ok_or_else(|| AppError::new(ErrorCode::PlanUnknown))?;
    Ok(plan_by_id(id))
}

/// Self-service plan change: the new plan's quota becomes the SMS limit,
/// `sms_used` is untouched.
pub async fn change_plan(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<ChangePlanRequest>,
) -> ApiResult<Business> {
    let plan = resolve_plan(&req.plan_id)?;

    let business = db::businesses::update_plan(
        &state.pool,
        &identity.business_id,
        plan.id.as_db(),
        plan.sms_included,
    )
    .await?
    .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;

    tracing::info!(
        business_id = %identity.business_id,
        plan = plan.name,
        "Plan changed"
    );

    Ok(Json(business))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_change_limit_comes_from_catalog() {
        for (raw, limit) in [("basic", 200), ("intermediate", 500), ("pro", 1000)] {
            let plan = resolve_plan(raw).unwrap();
            assert_eq!(plan.sms_included, limit);
            assert_eq!(plan.id.as_db(), raw);
        }
    }

    #[test]
    fn test_unknown_plan_rejected() {
        let err = resolve_plan("enterprise").unwrap_err();
        assert_eq!(err.code, ErrorCode::PlanUnknown);
    }
}
