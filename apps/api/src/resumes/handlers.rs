use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::{AppError, AppJson};
use crate::models::resume::ResumeRow;
use crate::resumes::pdf::extract_resume_text;
use crate::resumes::service::{
    analyze_resume, create_resume, delete_resume, get_resume, list_resumes, optimize_resume,
    AnalyzeResumeRequest, CreateResumeRequest, OptimizeResumeRequest,
};
use crate::state::AppState;

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let row = create_resume(&state, &user, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/v1/resumes/upload
///
/// Multipart form: `file` (the PDF) and an optional `title`.
pub async fn handle_upload(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let mut title: Option<String> = None;
    let mut file: Option<(Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                file = Some((file_name, bytes));
            }
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid title: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let content = extract_resume_text(bytes).await?;

    let title = title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| file_name.map(|n| n.trim_end_matches(".pdf").to_string()))
        .unwrap_or_default();

    let row = create_resume(&state, &user, CreateResumeRequest { title, content }).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    Ok(Json(list_resumes(&state, &user).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(get_resume(&state, &user, id).await?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_resume(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/analyze
///
/// The body is optional; an empty body analyses the resume on its own.
pub async fn handle_analyze(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<ResumeRow>, AppError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        AnalyzeResumeRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?
    };
    Ok(Json(analyze_resume(&state, &user, id, req).await?))
}

/// POST /api/v1/resumes/:id/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<OptimizeResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(optimize_resume(&state, &user, id, req).await?))
}
