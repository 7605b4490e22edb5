//! Admin user model

use serde::{Deserialize, Serialize};

/// Platform administrator, global (not tenant-scoped)
///
/// At least one admin must remain at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminUser {
    pub id: String,
    pub email: String,
}

/// Create admin payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserCreate {
    pub email: String,
}
