use shared::models::AdminUser;
use sqlx::PgPool;

pub async fn create(pool: &PgPool, id: &str, email: &str) -> Result<AdminUser, sqlx::Error> {
    sqlx::query_as("INSERT INTO admin_users (id, email) VALUES ($1, $2) RETURNING *")
        .bind(id)
        .bind(email)
        .fetch_one(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<AdminUser>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admin_users ORDER BY email")
        .fetch_all(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admin_users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Delete one admin, refusing to remove the last remaining row.
///
/// The count check and the delete run in one transaction so two concurrent
/// deletes cannot empty the table.
pub async fn delete_guarded(pool: &PgPool, id: &str) -> Result<AdminDeleteOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
        .fetch_one(&mut *tx)
        .await?;
    if let Some(outcome) = AdminDeleteOutcome::guard(count) {
        tx.rollback().await?;
        return Ok(outcome);
    }

    let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(AdminDeleteOutcome::from_rows_affected(
        result.rows_affected(),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDeleteOutcome {
    Deleted,
    NotFound,
    LastAdmin,
}

impl AdminDeleteOutcome {
    /// Pre-delete decision: `Some(LastAdmin)` blocks the delete whenever the
    /// roster holds one admin or fewer.
    fn guard(admin_count: i64) -> Option<Self> {
        (admin_count <= 1).then_some(Self::LastAdmin)
    }

    fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 { Self::Deleted } else { Self::NotFound }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_admin_delete_blocked() {
        assert_eq!(
            AdminDeleteOutcome::guard(1),
            Some(AdminDeleteOutcome::LastAdmin)
        );
        // An empty roster must never go further negative
        assert_eq!(
            AdminDeleteOutcome::guard(0),
            Some(AdminDeleteOutcome::LastAdmin)
        );
        assert_eq!(AdminDeleteOutcome::guard(2), None);
    }

    #[test]
    fn test_delete_outcome_from_row_count() {
        assert_eq!(
            AdminDeleteOutcome::from_rows_affected(1),
            AdminDeleteOutcome::Deleted
        );
        assert_eq!(
            AdminDeleteOutcome::from_rows_affected(0),
            AdminDeleteOutcome::NotFound
        );
    }
}
