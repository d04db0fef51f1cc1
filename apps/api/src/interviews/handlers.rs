use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::{AppError, AppJson};
use crate::interviews::service::{
    create_mock_interview, delete_interview, get_interview, list_interviews, submit_answer,
    CreateInterviewRequest, SubmitAnswerRequest,
};
use crate::models::interview::{InterviewQuestionRow, InterviewRow, InterviewWithQuestions};
use crate::state::AppState;

/// POST /api/v1/interviews
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewWithQuestions>), AppError> {
    let interview = create_mock_interview(&state, &user, req).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/v1/interviews
pub async fn handle_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    Ok(Json(list_interviews(&state, &user).await?))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewWithQuestions>, AppError> {
    Ok(Json(get_interview(&state, &user, id).await?))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_interview(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/interviews/:id/questions/:question_id/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, question_id)): Path<(Uuid, Uuid)>,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> Result<Json<InterviewQuestionRow>, AppError> {
    Ok(Json(submit_answer(&state, &user, id, question_id, req).await?))
}
