use axum::{extract::State, Json};

use crate::auth::CurrentUser;
use crate::errors::{AppError, AppJson};
use crate::linkedin::service::{
    generate_linkedin_profile, get_linkedin_profile, GenerateLinkedInProfileRequest,
};
use crate::models::linkedin::LinkedInProfileRow;
use crate::state::AppState;

/// POST /api/v1/linkedin-profile
pub async fn handle_generate(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<GenerateLinkedInProfileRequest>,
) -> Result<Json<LinkedInProfileRow>, AppError> {
    Ok(Json(generate_linkedin_profile(&state, &user, req).await?))
}

/// GET /api/v1/linkedin-profile
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<LinkedInProfileRow>, AppError> {
    Ok(Json(get_linkedin_profile(&state, &user).await?))
}
