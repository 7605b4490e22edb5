//! Business (tenant) model

use serde::{Deserialize, Serialize};

use crate::plans::PlanId;

/// Lifecycle status of a business account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Active,
    Disabled,
}

impl BusinessStatus {
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Business (tenant) profile
///
/// `sms_used` is monotonically non-decreasing except on explicit
/// administrative reset to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Business {
    pub id: String,
    /// Owning auth principal (accounts.id)
    pub user_id: String,
    pub name: String,
    pub plan_id: String,
    pub sms_used: i64,
    pub sms_limit: i64,
    pub status: String,
    pub created_at: i64,
}

impl Business {
    /// Resolved plan id, falling back to basic for unknown values
    pub fn plan(&self) -> PlanId {
        PlanId::from_db(&self.plan_id).unwrap_or(PlanId::Basic)
    }

    pub fn is_active(&self) -> bool {
        BusinessStatus::from_db(&self.status) == Some(BusinessStatus::Active)
    }
}

/// Admin-side update payload (plan, limit, status, usage reset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessUpdate {
    pub plan_id: Option<String>,
    pub sms_limit: Option<i64>,
    pub status: Option<String>,
    pub sms_used: Option<i64>,
}
