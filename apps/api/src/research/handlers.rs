use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::{AppError, AppJson};
use crate::models::research::{CompanyResearchRow, FinancialPlanRow};
use crate::research::service::{
    generate_company_research, generate_financial_plan, list_company_research,
    list_financial_plans, CreateFinancialPlanRequest,
};
use crate::state::AppState;

/// POST /api/v1/job-applications/:id/company-research
pub async fn handle_generate_company_research(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<CompanyResearchRow>), AppError> {
    let row = generate_company_research(&state, &user, id).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/company-research
pub async fn handle_list_company_research(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<CompanyResearchRow>>, AppError> {
    Ok(Json(list_company_research(&state, &user).await?))
}

/// POST /api/v1/financial-plans
pub async fn handle_generate_financial_plan(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<CreateFinancialPlanRequest>,
) -> Result<(StatusCode, Json<FinancialPlanRow>), AppError> {
    let row = generate_financial_plan(&state, &user, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/financial-plans
pub async fn handle_list_financial_plans(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<FinancialPlanRow>>, AppError> {
    Ok(Json(list_financial_plans(&state, &user).await?))
}
