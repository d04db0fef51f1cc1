use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Subscription states that grant unmetered generation.
const ACTIVE_SUBSCRIPTION_STATUSES: &[&str] = &["active", "trialing"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub credits: i32,
    /// Mirrors the billing provider's status: "active", "trialing", "past_due", "canceled", "none".
    pub subscription_status: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_active_subscription(&self) -> bool {
        ACTIVE_SUBSCRIPTION_STATUSES.contains(&self.subscription_status.as_str())
    }
}
