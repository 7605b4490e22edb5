use shared::models::Campaign;
use sqlx::PgPool;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    id: &str,
    business_id: &str,
    title: &str,
    content: &str,
    status: &str,
    scheduled_at: i64,
    recurrence: &str,
    now: i64,
) -> Result<Campaign, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO campaigns (id, business_id, title, content, status, scheduled_at, recurrence, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(id)
    .bind(business_id)
    .bind(title)
    .bind(content)
    .bind(status)
    .bind(scheduled_at)
    .bind(recurrence)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list_for_business(
    pool: &PgPool,
    business_id: &str,
) -> Result<Vec<Campaign>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM campaigns WHERE business_id = $1 ORDER BY created_at")
        .bind(business_id)
        .fetch_all(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: &str, business_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND business_id = $2")
        .bind(id)
        .bind(business_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
