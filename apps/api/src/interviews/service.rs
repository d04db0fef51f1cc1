use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::service::get_job_application;
use crate::auth::authorize;
use crate::billing::{charge_for, ensure_can_generate};
use crate::errors::AppError;
use crate::models::interview::{
    AnswerFeedback, AnswerRecord, GeneratedQuestions, InterviewQuestionRow, InterviewRow,
    InterviewType, InterviewWithQuestions, NewInterview,
};
use crate::models::user::User;
use crate::prompts::interview::QUESTION_COUNT;
use crate::prompts::{variables, ContentType, NOT_SPECIFIED};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub job_application_id: Uuid,
    pub interview_type: InterviewType,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

/// Generates a mock interview for one of the user's job applications and
/// stores it with its questions.
pub async fn create_mock_interview(
    state: &AppState,
    user: &User,
    req: CreateInterviewRequest,
) -> Result<InterviewWithQuestions, AppError> {
    let application = get_job_application(state, user, req.job_application_id).await?;
    let charge = ensure_can_generate(user)?;

    let generated = state
        .generator
        .generate::<GeneratedQuestions>(
            ContentType::InterviewQuestions,
            variables([
                ("interview_type", req.interview_type.as_str().replace('_', " ")),
                ("job_title", application.job_title.clone()),
                ("company", application.company.clone()),
                ("job_description", application.job_description.clone().unwrap_or_default()),
                ("question_count", QUESTION_COUNT.to_string()),
            ]),
        )
        .await?;

    let charge = charge_for(charge, &generated);
    let interview = state
        .repos
        .interviews
        .create(
            NewInterview {
                user_id: user.id,
                job_application_id: application.id,
                interview_type: req.interview_type,
                questions: generated.content.questions,
            },
            charge,
        )
        .await?;

    info!(
        "Mock interview {} ready for application {} ({:?}, source {:?})",
        interview.interview.id, application.id, charge, generated.source
    );
    Ok(interview)
}

pub async fn get_interview(
    state: &AppState,
    user: &User,
    id: Uuid,
) -> Result<InterviewWithQuestions, AppError> {
    let interview = state.repos.interviews.find(id).await?;
    authorize(interview, user.id, "Interview")
}

pub async fn list_interviews(state: &AppState, user: &User) -> Result<Vec<InterviewRow>, AppError> {
    Ok(state.repos.interviews.list_for_user(user.id).await?)
}

pub async fn delete_interview(state: &AppState, user: &User, id: Uuid) -> Result<(), AppError> {
    get_interview(state, user, id).await?;
    state.repos.interviews.delete(id).await?;
    info!("Deleted interview {id}");
    Ok(())
}

/// Scores the user's answer to one interview question and stores the feedback.
pub async fn submit_answer(
    state: &AppState,
    user: &User,
    interview_id: Uuid,
    question_id: Uuid,
    req: SubmitAnswerRequest,
) -> Result<InterviewQuestionRow, AppError> {
    if req.answer.trim().is_empty() {
        return Err(AppError::Validation("answer must not be empty".to_string()));
    }

    let interview = get_interview(state, user, interview_id).await?;
    let question = interview
        .questions
        .iter()
        .find(|q| q.id == question_id)
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;
    let charge = ensure_can_generate(user)?;

    // Interviews cascade with their application, so this is normally present.
    let application = state
        .repos
        .applications
        .find(interview.interview.job_application_id)
        .await?;
    let (job_title, company) = application
        .map(|a| (a.job_title, a.company))
        .unwrap_or_else(|| (NOT_SPECIFIED.to_string(), NOT_SPECIFIED.to_string()));

    let generated = state
        .generator
        .generate::<AnswerFeedback>(
            ContentType::AnswerFeedback,
            variables([
                ("interview_type", interview.interview.interview_type.replace('_', " ")),
                ("job_title", job_title),
                ("company", company),
                ("question", question.question.clone()),
                ("difficulty", question.difficulty.clone()),
                ("answer", req.answer.clone()),
            ]),
        )
        .await?;

    let charge = charge_for(charge, &generated);
    let row = state
        .repos
        .interviews
        .record_answer(
            user.id,
            question_id,
            AnswerRecord {
                answer: req.answer,
                feedback: generated.content,
            },
            charge,
        )
        .await?;

    info!("Scored answer to question {question_id}: {:?}", row.score);
    Ok(row)
}
