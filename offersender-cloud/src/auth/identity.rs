//! Session/identity resolution
//!
//! Classifies an authenticated account as a platform administrator or a
//! tenant BEFORE any further data is fetched. Admin status is an explicit
//! membership check against `admin_users`, never inferred from the success
//! or failure of a profile lookup.

use shared::error::{AppError, ErrorCode};
use shared::models::Business;
use sqlx::PgPool;

use crate::db;
use crate::error::ServiceResult;

/// The resolved principal for a session
#[derive(Debug, Clone)]
pub enum Principal {
    Admin { account_id: String, email: String },
    Tenant(Business),
}

/// Resolve the principal for an authenticated account.
///
/// Admin membership wins over a tenant profile; an account that is neither
/// an admin nor linked to a business has no data scope and is rejected.
pub async fn resolve_principal(
    pool: &PgPool,
    account_id: &str,
    email: &str,
) -> ServiceResult<Principal> {
    if db::admins::find_by_email(pool, email).await?.is_some() {
        return Ok(Principal::Admin {
            account_id: account_id.to_string(),
            email: email.to_string(),
        });
    }

    let business = db::businesses::find_by_user(pool, account_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;

    if !business.is_active() {
        return Err(AppError::new(ErrorCode::BusinessDisabled).into());
    }

    Ok(Principal::Tenant(business))
}
