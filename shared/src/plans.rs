//! Subscription plan catalog
//!
//! Plan → SMS quota mapping; prices in NZ$.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subscription plan identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Basic,
    Intermediate,
    Pro,
}

impl PlanId {
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Pro => "pro",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(Self::Basic),
            "intermediate" => Some(Self::Intermediate),
            "pro" => Some(Self::Pro),
            _ => None,
        }
    }
}

/// A subscription plan
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: &'static str,
    pub price: Decimal,
    pub currency: &'static str,
    pub sms_included: i64,
    pub features: &'static [&'static str],
}

/// The full pricing catalog, cheapest first
pub fn pricing_plans() -> [Plan; 3] {
    [
        Plan {
            id: PlanId::Basic,
            name: "Basic",
            price: Decimal::new(5999, 2),
            currency: "NZ$",
            sms_included: 200,
            features: &[
                "200 SMS/month",
                "Customer Management",
                "Campaign Scheduling",
                "Basic Reporting",
            ],
        },
        Plan {
            id: PlanId::Intermediate,
            name: "Intermediate",
            price: Decimal::new(9999, 2),
            currency: "NZ$",
            sms_included: 500,
            features: &[
                "500 SMS/month",
                "All Basic Features",
                "CSV Import",
                "Delivery Reports",
            ],
        },
        Plan {
            id: PlanId::Pro,
            name: "Pro",
            price: Decimal::new(14999, 2),
            currency: "NZ$",
            sms_included: 1000,
            features: &[
                "1000 SMS/month",
                "All Intermediate Features",
                "Priority Support",
                "API Access",
            ],
        },
    ]
}

/// Look up a plan by id
pub fn plan_by_id(id: PlanId) -> Plan {
    pricing_plans()
        .into_iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| pricing_plans()[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_quota_mapping() {
        assert_eq!(plan_by_id(PlanId::Basic).sms_included, 200);
        assert_eq!(plan_by_id(PlanId::Intermediate).sms_included, 500);
        assert_eq!(plan_by_id(PlanId::Pro).sms_included, 1000);
    }

    #[test]
    fn test_plan_id_db_roundtrip() {
        for id in [PlanId::Basic, PlanId::Intermediate, PlanId::Pro] {
            assert_eq!(PlanId::from_db(id.as_db()), Some(id));
        }
        assert_eq!(PlanId::from_db("enterprise"), None);
    }
}
