use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Where an application is in the hiring pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Saved,
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Saved => "saved",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub job_description: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJobApplication {
    pub user_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub job_description: Option<String>,
    pub location: Option<String>,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobApplicationUpdate {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub job_description: Option<String>,
    pub location: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
}

impl JobApplicationUpdate {
    pub fn is_empty(&self) -> bool {
        self.job_title.is_none()
            && self.company.is_none()
            && self.job_description.is_none()
            && self.location.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_is_snake_case() {
        let status: ApplicationStatus = serde_json::from_str(r#""interviewing""#).unwrap();
        assert_eq!(status, ApplicationStatus::Interviewing);
        assert_eq!(status.as_str(), "interviewing");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<ApplicationStatus>(r#""ghosted""#).is_err());
    }

    #[test]
    fn test_empty_update_is_detected() {
        assert!(JobApplicationUpdate::default().is_empty());
        let update: JobApplicationUpdate =
            serde_json::from_value(serde_json::json!({"status": "offer"})).unwrap();
        assert!(!update.is_empty());
    }
}
