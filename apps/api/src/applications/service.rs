use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::authorize;
use crate::errors::AppError;
use crate::models::job_application::{
    ApplicationStatus, JobApplicationRow, JobApplicationUpdate, NewJobApplication,
};
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobApplicationRequest {
    pub job_title: String,
    pub company: String,
    pub job_description: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub notes: Option<String>,
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub async fn create_job_application(
    state: &AppState,
    user: &User,
    req: CreateJobApplicationRequest,
) -> Result<JobApplicationRow, AppError> {
    require_text("job_title", &req.job_title)?;
    require_text("company", &req.company)?;

    let row = state
        .repos
        .applications
        .create(NewJobApplication {
            user_id: user.id,
            job_title: req.job_title.trim().to_string(),
            company: req.company.trim().to_string(),
            job_description: req.job_description,
            location: req.location,
            status: req.status,
            notes: req.notes,
        })
        .await?;

    info!("Created job application {} for user {}", row.id, user.id);
    Ok(row)
}

/// Loads an application the user owns.
pub async fn get_job_application(
    state: &AppState,
    user: &User,
    id: Uuid,
) -> Result<JobApplicationRow, AppError> {
    let row = state.repos.applications.find(id).await?;
    authorize(row, user.id, "Job application")
}

pub async fn list_job_applications(
    state: &AppState,
    user: &User,
) -> Result<Vec<JobApplicationRow>, AppError> {
    Ok(state.repos.applications.list_for_user(user.id).await?)
}

pub async fn update_job_application(
    state: &AppState,
    user: &User,
    id: Uuid,
    update: JobApplicationUpdate,
) -> Result<JobApplicationRow, AppError> {
    if update.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }
    if let Some(title) = &update.job_title {
        require_text("job_title", title)?;
    }
    if let Some(company) = &update.company {
        require_text("company", company)?;
    }

    get_job_application(state, user, id).await?;
    Ok(state.repos.applications.update(id, &update).await?)
}

pub async fn delete_job_application(
    state: &AppState,
    user: &User,
    id: Uuid,
) -> Result<(), AppError> {
    get_job_application(state, user, id).await?;
    state.repos.applications.delete(id).await?;
    info!("Deleted job application {id}");
    Ok(())
}
