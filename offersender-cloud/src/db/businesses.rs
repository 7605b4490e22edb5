use shared::models::{Business, BusinessUpdate};
use sqlx::PgPool;

pub async fn create(
    pool: &PgPool,
    id: &str,
    user_id: &str,
    name: &str,
    plan_id: &str,
    sms_limit: i64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO businesses (id, user_id, name, plan_id, sms_used, sms_limit, status, created_at)
         VALUES ($1, $2, $3, $4, 0, $5, 'active', $6)",
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(plan_id)
    .bind(sms_limit)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM businesses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_user(pool: &PgPool, user_id: &str) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM businesses WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Business>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM businesses ORDER BY created_at")
        .fetch_all(pool)
        .await
}

pub async fn update_name(pool: &PgPool, id: &str, name: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE businesses SET name = $1 WHERE id = $2")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_plan(
    pool: &PgPool,
    id: &str,
    plan_id: &str,
    sms_limit: i64,
) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE businesses SET plan_id = $1, sms_limit = $2 WHERE id = $3 RETURNING *",
    )
    .bind(plan_id)
    .bind(sms_limit)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Admin-side update: plan, limit, status, and explicit usage writes
/// (including the reset-to-0 path). Only provided fields change.
pub async fn admin_update(
    pool: &PgPool,
    id: &str,
    update: &BusinessUpdate,
) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE businesses SET
            plan_id   = COALESCE($1, plan_id),
            sms_limit = COALESCE($2, sms_limit),
            status    = COALESCE($3, status),
            sms_used  = COALESCE($4, sms_used)
         WHERE id = $5
         RETURNING *",
    )
    .bind(update.plan_id.as_deref())
    .bind(update.sms_limit)
    .bind(update.status.as_deref())
    .bind(update.sms_used)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Post-run quota write: `sms_used` only ever grows here; resets go through
/// [`admin_update`].
pub async fn add_sms_usage(pool: &PgPool, id: &str, sent: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE businesses SET sms_used = sms_used + $1 WHERE id = $2")
        .bind(sent)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Hard delete (admin only; tenants can never delete their own business).
pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM businesses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
