//! Campaign endpoints
//!
//! Campaigns are informational records; nothing executes them on schedule.
//! Bulk sends run out-of-band through the dispatch endpoint.

use axum::extract::Path;
use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{Campaign, CampaignCreate, CampaignStatus};

use crate::auth::TenantIdentity;
use crate::db;
use crate::state::AppState;
use crate::util::new_id;

use super::super::ApiResult;

/// GET /api/tenant/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<Vec<Campaign>> {
    let campaigns = db::campaigns::list_for_business(&state.pool, &identity.business_id).await?;
    Ok(Json(campaigns))
}

/// POST /api/tenant/campaigns — campaigns are created in `scheduled` status
pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<CampaignCreate>,
) -> ApiResult<Campaign> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Campaign title required").into());
    }
    if req.content.trim().is_empty() {
        return Err(AppError::validation("Campaign content required").into());
    }

    let campaign = db::campaigns::create(
        &state.pool,
        &new_id(),
        &identity.business_id,
        title,
        req.content.trim(),
        CampaignStatus::Scheduled.as_db(),
        req.scheduled_at,
        req.recurrence.as_db(),
        shared::util::now_millis(),
    )
    .await?;

    Ok(Json(campaign))
}

/// DELETE /api/tenant/campaigns/{id}
pub async fn delete_campaign(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::campaigns::delete(&state.pool, &id, &identity.business_id).await?;

    if !deleted {
        return Err(AppError::new(ErrorCode::CampaignNotFound).into());
    }
    Ok(Json(serde_json::json!({ "message": "Campaign deleted" })))
}
