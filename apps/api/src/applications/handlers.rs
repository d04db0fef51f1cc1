use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::applications::service::{
    create_job_application, delete_job_application, get_job_application, list_job_applications,
    update_job_application, CreateJobApplicationRequest,
};
use crate::auth::CurrentUser;
use crate::errors::{AppError, AppJson};
use crate::models::job_application::{JobApplicationRow, JobApplicationUpdate};
use crate::state::AppState;

/// POST /api/v1/job-applications
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<CreateJobApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplicationRow>), AppError> {
    let row = create_job_application(&state, &user, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/job-applications
pub async fn handle_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<JobApplicationRow>>, AppError> {
    Ok(Json(list_job_applications(&state, &user).await?))
}

/// GET /api/v1/job-applications/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobApplicationRow>, AppError> {
    Ok(Json(get_job_application(&state, &user, id).await?))
}

/// PATCH /api/v1/job-applications/:id
pub async fn handle_update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(update): AppJson<JobApplicationUpdate>,
) -> Result<Json<JobApplicationRow>, AppError> {
    Ok(Json(update_job_application(&state, &user, id, update).await?))
}

/// DELETE /api/v1/job-applications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_job_application(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
