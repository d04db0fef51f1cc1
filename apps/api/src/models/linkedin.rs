use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One profile per user; regenerating overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LinkedInProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub headline: String,
    pub about: String,
    pub experience_highlights: Vec<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInProfileContent {
    pub headline: String,
    pub about: String,
    pub experience_highlights: Vec<String>,
    pub skills: Vec<String>,
}
