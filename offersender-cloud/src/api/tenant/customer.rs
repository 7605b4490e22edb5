//! Customer CRUD endpoints, scoped by the owning business

use axum::extract::Path;
use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};

use crate::auth::TenantIdentity;
use crate::db;
use crate::state::AppState;
use crate::util::new_id;

use super::super::ApiResult;

/// GET /api/tenant/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<Vec<Customer>> {
    let customers = db::customers::list_for_business(&state.pool, &identity.business_id).await?;
    Ok(Json(customers))
}

/// POST /api/tenant/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<CustomerCreate>,
) -> ApiResult<Customer> {
    let name = req.name.trim();
    let phone = req.phone.trim();
    if name.is_empty() {
        return Err(AppError::validation("Customer name required").into());
    }
    if phone.is_empty() {
        return Err(AppError::validation("Customer phone required").into());
    }

    let customer = db::customers::create(
        &state.pool,
        &new_id(),
        &identity.business_id,
        name,
        phone,
        shared::util::now_millis(),
    )
    .await?;

    Ok(Json(customer))
}

/// PUT /api/tenant/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
    Json(req): Json<CustomerUpdate>,
) -> ApiResult<Customer> {
    let customer = db::customers::update(
        &state.pool,
        &id,
        &identity.business_id,
        req.name.as_deref(),
        req.phone.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    Ok(Json(customer))
}

/// DELETE /api/tenant/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::customers::delete(&state.pool, &id, &identity.business_id).await?;

    if !deleted {
        return Err(AppError::new(ErrorCode::CustomerNotFound).into());
    }
    Ok(Json(serde_json::json!({ "message": "Customer deleted" })))
}
