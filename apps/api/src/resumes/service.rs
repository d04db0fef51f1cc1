use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::service::get_job_application;
use crate::auth::authorize;
use crate::billing::{charge_for, ensure_can_generate};
use crate::errors::AppError;
use crate::models::job_application::JobApplicationRow;
use crate::models::resume::{NewResume, OptimizedResume, ResumeAnalysis, ResumeRow};
use crate::models::user::User;
use crate::prompts::{variables, ContentType};
use crate::state::AppState;

/// Resume text past this length is cut before it goes into a prompt.
pub const MAX_PROMPT_RESUME_CHARS: usize = 24_000;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeResumeRequest {
    /// Analyse against this application; omitted means a general review.
    #[serde(default)]
    pub job_application_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeResumeRequest {
    pub job_application_id: Uuid,
}

pub async fn create_resume(
    state: &AppState,
    user: &User,
    req: CreateResumeRequest,
) -> Result<ResumeRow, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }
    let title = match req.title.trim() {
        "" => "Untitled resume".to_string(),
        t => t.to_string(),
    };

    let row = state
        .repos
        .resumes
        .create(NewResume {
            user_id: user.id,
            title,
            content: req.content.trim().to_string(),
        })
        .await?;

    info!("Created resume {} for user {}", row.id, user.id);
    Ok(row)
}

pub async fn get_resume(state: &AppState, user: &User, id: Uuid) -> Result<ResumeRow, AppError> {
    let row = state.repos.resumes.find(id).await?;
    authorize(row, user.id, "Resume")
}

pub async fn list_resumes(state: &AppState, user: &User) -> Result<Vec<ResumeRow>, AppError> {
    Ok(state.repos.resumes.list_for_user(user.id).await?)
}

pub async fn delete_resume(state: &AppState, user: &User, id: Uuid) -> Result<(), AppError> {
    get_resume(state, user, id).await?;
    state.repos.resumes.delete(id).await?;
    info!("Deleted resume {id}");
    Ok(())
}

fn prompt_resume_text(content: &str) -> String {
    match content.char_indices().nth(MAX_PROMPT_RESUME_CHARS) {
        Some((cut, _)) => content[..cut].to_string(),
        None => content.to_string(),
    }
}

/// Variables shared by the analysis and optimisation prompts.
fn resume_variables(
    resume: &ResumeRow,
    application: Option<&JobApplicationRow>,
) -> std::collections::BTreeMap<String, String> {
    variables([
        ("job_title", application.map(|a| a.job_title.clone()).unwrap_or_default()),
        ("company", application.map(|a| a.company.clone()).unwrap_or_default()),
        (
            "job_description",
            application
                .and_then(|a| a.job_description.clone())
                .unwrap_or_default(),
        ),
        ("resume_content", prompt_resume_text(&resume.content)),
    ])
}

/// Scores a resume, optionally against a job application, and stores the
/// latest analysis on the resume.
pub async fn analyze_resume(
    state: &AppState,
    user: &User,
    id: Uuid,
    req: AnalyzeResumeRequest,
) -> Result<ResumeRow, AppError> {
    let resume = get_resume(state, user, id).await?;
    let application = match req.job_application_id {
        Some(app_id) => Some(get_job_application(state, user, app_id).await?),
        None => None,
    };
    let charge = ensure_can_generate(user)?;

    let generated = state
        .generator
        .generate::<ResumeAnalysis>(
            ContentType::ResumeAnalysis,
            resume_variables(&resume, application.as_ref()),
        )
        .await?;

    let charge = charge_for(charge, &generated);
    let row = state
        .repos
        .resumes
        .save_analysis(user.id, resume.id, &generated.content, charge)
        .await?;

    info!(
        "Resume {} analysed: score {} ({})",
        row.id, generated.content.overall_score, generated.content.ats_compatibility
    );
    Ok(row)
}

/// Rewrites a resume for a job application and stores the result alongside
/// the original content.
pub async fn optimize_resume(
    state: &AppState,
    user: &User,
    id: Uuid,
    req: OptimizeResumeRequest,
) -> Result<ResumeRow, AppError> {
    let resume = get_resume(state, user, id).await?;
    let application = get_job_application(state, user, req.job_application_id).await?;
    let charge = ensure_can_generate(user)?;

    let generated = state
        .generator
        .generate::<OptimizedResume>(
            ContentType::ResumeOptimization,
            resume_variables(&resume, Some(&application)),
        )
        .await?;

    let charge = charge_for(charge, &generated);
    let row = state
        .repos
        .resumes
        .save_optimization(user.id, resume.id, &generated.content, charge)
        .await?;

    info!("Resume {} optimised for application {}", row.id, application.id);
    Ok(row)
}
