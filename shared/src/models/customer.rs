//! Customer model

use serde::{Deserialize, Serialize};

/// Customer entity, owned exclusively by one business
///
/// `phone` is stored free-form and normalized at send time, not at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub phone: String,
    pub created_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
}

/// Update customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}
