use shared::models::Customer;
use sqlx::PgPool;

pub async fn create(
    pool: &PgPool,
    id: &str,
    business_id: &str,
    name: &str,
    phone: &str,
    now: i64,
) -> Result<Customer, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO customers (id, business_id, name, phone, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(id)
    .bind(business_id)
    .bind(name)
    .bind(phone)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Customer list in insertion order: this is the order bulk dispatch walks.
pub async fn list_for_business(
    pool: &PgPool,
    business_id: &str,
) -> Result<Vec<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customers WHERE business_id = $1 ORDER BY created_at, id")
        .bind(business_id)
        .fetch_all(pool)
        .await
}

/// Update scoped by owner: a tenant can never touch another tenant's rows.
pub async fn update(
    pool: &PgPool,
    id: &str,
    business_id: &str,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE customers SET
            name  = COALESCE($1, name),
            phone = COALESCE($2, phone)
         WHERE id = $3 AND business_id = $4
         RETURNING *",
    )
    .bind(name)
    .bind(phone)
    .bind(id)
    .bind(business_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: &str, business_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND business_id = $2")
        .bind(id)
        .bind(business_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
