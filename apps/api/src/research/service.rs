use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::service::get_job_application;
use crate::billing::{charge_for, ensure_can_generate};
use crate::errors::AppError;
use crate::models::research::{
    CompanyBriefing, CompanyResearchRow, FinancialPlanContent, FinancialPlanRow,
    NewCompanyResearch, NewFinancialPlan,
};
use crate::models::user::User;
use crate::prompts::{variables, ContentType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFinancialPlanRequest {
    pub job_title: String,
    pub current_salary: f64,
    pub target_salary: f64,
    pub location: Option<String>,
}

/// Researches the company behind one of the user's job applications.
pub async fn generate_company_research(
    state: &AppState,
    user: &User,
    job_application_id: Uuid,
) -> Result<CompanyResearchRow, AppError> {
    let application = get_job_application(state, user, job_application_id).await?;
    let charge = ensure_can_generate(user)?;

    let generated = state
        .generator
        .generate::<CompanyBriefing>(
            ContentType::CompanyResearch,
            variables([
                ("company", application.company.clone()),
                ("job_title", application.job_title.clone()),
                ("job_description", application.job_description.clone().unwrap_or_default()),
            ]),
        )
        .await?;

    let charge = charge_for(charge, &generated);
    let row = state
        .repos
        .company_research
        .create(
            NewCompanyResearch {
                user_id: user.id,
                job_application_id: application.id,
                company: application.company,
                briefing: generated.content,
            },
            charge,
        )
        .await?;

    info!("Company research {} generated for application {}", row.id, job_application_id);
    Ok(row)
}

pub async fn list_company_research(
    state: &AppState,
    user: &User,
) -> Result<Vec<CompanyResearchRow>, AppError> {
    Ok(state.repos.company_research.list_for_user(user.id).await?)
}

fn format_salary(amount: f64) -> String {
    format!("{amount:.0}")
}

/// Builds a salary negotiation and budgeting plan for a target role.
pub async fn generate_financial_plan(
    state: &AppState,
    user: &User,
    req: CreateFinancialPlanRequest,
) -> Result<FinancialPlanRow, AppError> {
    if req.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title must not be empty".to_string()));
    }
    if !(req.current_salary.is_finite() && req.current_salary >= 0.0) {
        return Err(AppError::Validation("current_salary must be a non-negative number".to_string()));
    }
    if !(req.target_salary.is_finite() && req.target_salary > 0.0) {
        return Err(AppError::Validation("target_salary must be a positive number".to_string()));
    }
    let charge = ensure_can_generate(user)?;

    let generated = state
        .generator
        .generate::<FinancialPlanContent>(
            ContentType::FinancialPlan,
            variables([
                ("job_title", req.job_title.clone()),
                ("location", req.location.clone().unwrap_or_default()),
                ("current_salary", format_salary(req.current_salary)),
                ("target_salary", format_salary(req.target_salary)),
            ]),
        )
        .await?;

    let charge = charge_for(charge, &generated);
    let row = state
        .repos
        .financial_plans
        .create(
            NewFinancialPlan {
                user_id: user.id,
                job_title: req.job_title.trim().to_string(),
                current_salary: req.current_salary,
                target_salary: req.target_salary,
                location: req.location,
                plan: generated.content,
            },
            charge,
        )
        .await?;

    info!("Financial plan {} generated for user {}", row.id, user.id);
    Ok(row)
}

pub async fn list_financial_plans(
    state: &AppState,
    user: &User,
) -> Result<Vec<FinancialPlanRow>, AppError> {
    Ok(state.repos.financial_plans.list_for_user(user.id).await?)
}
