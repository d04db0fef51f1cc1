pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::pdf::MAX_PDF_BYTES;
use crate::state::AppState;
use crate::{applications, billing, interviews, linkedin, research, resumes};

/// Multipart framing on top of the PDF itself.
const UPLOAD_BODY_LIMIT: usize = MAX_PDF_BYTES + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/account", get(billing::handle_get_account))
        // Job applications
        .route(
            "/api/v1/job-applications",
            post(applications::handlers::handle_create).get(applications::handlers::handle_list),
        )
        .route(
            "/api/v1/job-applications/:id",
            get(applications::handlers::handle_get)
                .patch(applications::handlers::handle_update)
                .delete(applications::handlers::handle_delete),
        )
        .route(
            "/api/v1/job-applications/:id/company-research",
            post(research::handlers::handle_generate_company_research),
        )
        // Mock interviews
        .route(
            "/api/v1/interviews",
            post(interviews::handlers::handle_create).get(interviews::handlers::handle_list),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handlers::handle_get).delete(interviews::handlers::handle_delete),
        )
        .route(
            "/api/v1/interviews/:id/questions/:question_id/answer",
            post(interviews::handlers::handle_submit_answer),
        )
        // Research & planning
        .route(
            "/api/v1/company-research",
            get(research::handlers::handle_list_company_research),
        )
        .route(
            "/api/v1/financial-plans",
            post(research::handlers::handle_generate_financial_plan)
                .get(research::handlers::handle_list_financial_plans),
        )
        // LinkedIn
        .route(
            "/api/v1/linkedin-profile",
            post(linkedin::handlers::handle_generate).get(linkedin::handlers::handle_get),
        )
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handlers::handle_create).get(resumes::handlers::handle_list),
        )
        .route(
            "/api/v1/resumes/upload",
            post(resumes::handlers::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handlers::handle_get).delete(resumes::handlers::handle_delete),
        )
        .route(
            "/api/v1/resumes/:id/analyze",
            post(resumes::handlers::handle_analyze),
        )
        .route(
            "/api/v1/resumes/:id/optimize",
            post(resumes::handlers::handle_optimize),
        )
        .with_state(state)
}
