// SPDX-License-Identifier: MIT

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// Plan tier controlling feature ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Pro,
    Enterprise,
}

impl PlanType {
    /// Pro and enterprise share the unlimited tier.
    pub fn is_pro(self) -> bool {
        matches!(self, PlanType::Pro | PlanType::Enterprise)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Pro => "pro",
            PlanType::Enterprise => "enterprise",
        }
    }

    /// Parse the stored column value. Unknown values fall back to free
    /// rather than failing the whole row.
    pub fn from_db(value: &str) -> Self {
        match value {
            "pro" => PlanType::Pro,
            "enterprise" => PlanType::Enterprise,
            _ => PlanType::Free,
        }
    }
}

/// User profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity provider subject, used as the primary key
    pub id: String,
    /// Unique email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL (may be absent)
    pub image: Option<String>,
    /// Identity provider tag
    pub provider: String,
    /// Plan tier
    pub plan_type: PlanType,
    /// Subscription status
    pub subscription_status: String,
    /// Credits granted
    pub credits_total: i64,
    /// Credits consumed
    pub credits_used: i64,
    /// Next billing date (RFC3339, unset for free users)
    pub next_billing_date: Option<String>,
    /// When the user first logged in (RFC3339)
    pub created_at: String,
    /// Most recent login (RFC3339)
    pub last_login: Option<String>,
}

/// Profile fields supplied by the identity provider at first login.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub provider: String,
}
