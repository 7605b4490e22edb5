//! Admin business management: list every tenant, adjust plan/quota/status,
//! hard-delete a tenant.

use axum::extract::Path;
use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{Business, BusinessStatus, BusinessUpdate};
use shared::plans::PlanId;

use crate::auth::AdminIdentity;
use crate::db;
use crate::state::AppState;

use super::super::ApiResult;

/// GET /api/admin/businesses
pub async fn list_businesses(
    State(state): State<AppState>,
    Extension(_identity): Extension<AdminIdentity>,
) -> ApiResult<Vec<Business>> {
    let businesses = db::businesses::list_all(&state.pool).await?;
    Ok(Json(businesses))
}

/// PUT /api/admin/businesses/{id}
///
/// Partial update: only the provided fields change. `sms_used: 0` is the
/// usage-reset path.
pub async fn update_business(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(id): Path<String>,
    Json(update): Json<BusinessUpdate>,
) -> ApiResult<Business> {
    if let Some(status) = update.status.as_deref() {
        if BusinessStatus::from_db(status).is_none() {
            return Err(AppError::validation(format!("Unknown status '{status}'")).into());
        }
    }
    if let Some(plan_id) = update.plan_id.as_deref() {
        if PlanId::from_db(plan_id).is_none() {
            return Err(AppError::new(ErrorCode::PlanUnknown).into());
        }
    }
    if let Some(limit) = update.sms_limit {
        if limit <= 0 {
            return Err(AppError::validation("SMS limit must be positive").into());
        }
    }
    if let Some(used) = update.sms_used {
        if used < 0 {
            return Err(AppError::validation("SMS usage must not be negative").into());
        }
    }

    let business = db::businesses::admin_update(&state.pool, &id, &update)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;

    tracing::info!(
        admin = %identity.email,
        business_id = %id,
        "Business updated by admin"
    );

    Ok(Json(business))
}

/// DELETE /api/admin/businesses/{id}
pub async fn delete_business(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::businesses::delete(&state.pool, &id).await?;

    if !deleted {
        return Err(AppError::new(ErrorCode::BusinessNotFound).into());
    }

    tracing::warn!(admin = %identity.email, business_id = %id, "Business deleted");
    Ok(Json(serde_json::json!({ "message": "Business deleted" })))
}
