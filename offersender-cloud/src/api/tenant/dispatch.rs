//! Bulk send and connection test endpoints
//!
//! The HTTP layer wires the dispatch engine to the tenant's live customer
//! list and the Postgres usage recorder, collects the run log, and returns
//! the aggregated report.

use async_trait::async_trait;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use sqlx::PgPool;

use crate::auth::TenantIdentity;
use crate::db;
use crate::sms::dispatch::{self, AUTH_FAILED, PROXY_LOCK_REQUIRED, UsageRecorder};
use crate::sms::strategy::basic_credential;
use crate::sms::tester;
use crate::state::AppState;

use super::super::ApiResult;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Quota write against the owning business row.
struct PgUsageRecorder {
    pool: PgPool,
}

#[async_trait]
impl UsageRecorder for PgUsageRecorder {
    async fn add_usage(&self, business_id: &str, sent: i64) -> Result<(), BoxError> {
        db::businesses::add_sms_usage(&self.pool, business_id, sent).await?;
        Ok(())
    }
}

/// POST /api/tenant/dispatch
#[derive(Deserialize)]
pub struct BulkSendRequest {
    pub message: String,
    pub gateway_password: String,
}

#[derive(Serialize)]
pub struct BulkSendResponse {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub log: Vec<String>,
}

pub async fn bulk_send(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<BulkSendRequest>,
) -> ApiResult<BulkSendResponse> {
    // Precondition errors fail before any network activity
    if req.gateway_password.trim().is_empty() {
        return Err(AppError::new(ErrorCode::CredentialMissing).into());
    }
    if req.message.trim().is_empty() {
        return Err(AppError::validation("Message text required").into());
    }

    let business = db::businesses::find_by_id(&state.pool, &identity.business_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;

    let customers = db::customers::list_for_business(&state.pool, &business.id).await?;
    if customers.is_empty() {
        return Err(AppError::new(ErrorCode::NoRecipients).into());
    }

    let auth = basic_credential(&state.gateway_username, &req.gateway_password);
    let usage = PgUsageRecorder {
        pool: state.pool.clone(),
    };

    let mut log = Vec::new();
    let report = dispatch::run(
        state.chain.as_ref(),
        &customers,
        &req.message,
        &auth,
        &business.id,
        &usage,
        |progress| {
            tracing::info!(
                business_id = %business.id,
                processed = progress.processed,
                total = progress.total,
                success = progress.success,
                failed = progress.failed,
                "Dispatch progress"
            );
        },
        |line| log.push(line),
    )
    .await;

    if report.failed > 0 {
        log.push(curl_fallback(
            &state.gateway_url,
            &state.originator,
            &auth,
            &req.message,
        ));
    }

    match report.last_error.as_deref() {
        Some(PROXY_LOCK_REQUIRED) => {
            tracing::warn!(business_id = %business.id, "Dispatch aborted: relay locked");
        }
        Some(AUTH_FAILED) => {
            tracing::warn!(business_id = %business.id, "Dispatch aborted: gateway rejected credentials");
        }
        _ => {}
    }

    Ok(Json(BulkSendResponse {
        total: report.total,
        success: report.success,
        failed: report.failed,
        last_error: report.last_error,
        log,
    }))
}

/// Last-resort instruction appended to the run log when anything failed:
/// a copy-pastable direct gateway request the user can run by hand.
fn curl_fallback(gateway_url: &str, originator: &str, auth: &str, message: &str) -> String {
    let body = serde_json::json!({
        "Message": message,
        "Originator": originator,
        "Destinations": ["<phone>"],
        "Action": "create",
    });
    format!(
        "Manual fallback: curl -X POST {gateway_url} \
         -H \"Authorization: Basic {auth}\" \
         -H \"Content-Type: application/json\" \
         -d '{body}'"
    )
}

/// POST /api/tenant/dispatch/test
#[derive(Deserialize)]
pub struct TestConnectionRequest {
    pub gateway_password: String,
}

#[derive(Serialize)]
pub struct TestConnectionResponse {
    pub success: bool,
    pub message: String,
    pub needs_unlock: bool,
}

pub async fn test_connection(
    State(state): State<AppState>,
    Extension(_identity): Extension<TenantIdentity>,
    Json(req): Json<TestConnectionRequest>,
) -> ApiResult<TestConnectionResponse> {
    if req.gateway_password.trim().is_empty() {
        return Err(AppError::new(ErrorCode::CredentialMissing).into());
    }

    let auth = basic_credential(&state.gateway_username, &req.gateway_password);
    let outcome = tester::test_connection(state.chain.as_ref(), &auth).await;

    Ok(Json(TestConnectionResponse {
        success: outcome.success,
        message: outcome.message,
        needs_unlock: outcome.needs_unlock,
    }))
}
