//! Admin roster management
//!
//! Admin rights are granted by email: any account whose email appears in
//! `admin_users` logs in with the admin role. The last remaining row can
//! never be deleted.

use axum::extract::Path;
use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{AdminUser, AdminUserCreate};

use crate::auth::AdminIdentity;
use crate::db;
use crate::db::admins::AdminDeleteOutcome;
use crate::state::AppState;
use crate::util::new_id;

use super::super::ApiResult;

/// GET /api/admin/admins
pub async fn list_admins(
    State(state): State<AppState>,
    Extension(_identity): Extension<AdminIdentity>,
) -> ApiResult<Vec<AdminUser>> {
    let admins = db::admins::list_all(&state.pool).await?;
    Ok(Json(admins))
}

/// POST /api/admin/admins
pub async fn create_admin(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Json(req): Json<AdminUserCreate>,
) -> ApiResult<AdminUser> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required").into());
    }

    if db::admins::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::with_message(
            ErrorCode::AlreadyExists,
            "That email is already an admin",
        )
        .into());
    }

    let admin = db::admins::create(&state.pool, &new_id(), &email).await?;

    tracing::info!(admin = %identity.email, new_admin = %email, "Admin added");
    Ok(Json(admin))
}

/// DELETE /api/admin/admins/{id}
pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let outcome = db::admins::delete_guarded(&state.pool, &id).await?;

    match outcome {
        AdminDeleteOutcome::Deleted => {
            tracing::info!(admin = %identity.email, deleted_admin_id = %id, "Admin removed");
            Ok(Json(serde_json::json!({ "message": "Admin removed" })))
        }
        AdminDeleteOutcome::LastAdmin => {
            Err(AppError::new(ErrorCode::CannotDeleteLastAdmin).into())
        }
        AdminDeleteOutcome::NotFound => Err(AppError::new(ErrorCode::NotFound).into()),
    }
}
