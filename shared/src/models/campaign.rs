//! Campaign model
//!
//! Campaigns are informational records: no scheduler transitions their
//! status, and bulk sends run out-of-band against the live customer list.

use serde::{Deserialize, Serialize};

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sending,
    Sent,
    Failed,
}

impl CampaignStatus {
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "scheduled" => Some(Self::Scheduled),
            "sending" => Some(Self::Sending),
            "sent" => Some(Self::Sent),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Campaign recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignRecurrence {
    OneTime,
    Weekly,
    Monthly,
}

impl CampaignRecurrence {
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "one_time" => Some(Self::OneTime),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Campaign entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Campaign {
    pub id: String,
    pub business_id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub scheduled_at: i64,
    pub recurrence: String,
    pub created_at: i64,
}

/// Create campaign payload (campaigns are created in `scheduled` status)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignCreate {
    pub title: String,
    pub content: String,
    pub scheduled_at: i64,
    pub recurrence: CampaignRecurrence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            CampaignStatus::Draft,
            CampaignStatus::Scheduled,
            CampaignStatus::Sending,
            CampaignStatus::Sent,
            CampaignStatus::Failed,
        ] {
            assert_eq!(CampaignStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(CampaignStatus::from_db("bogus"), None);
    }
}
