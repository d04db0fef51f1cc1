//! Caller identity. An upstream gateway authenticates the session and forwards
//! the user id in `x-user-id`; this extractor resolves it to a `User`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, loaded fresh for each request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(AppError::Unauthorized)?;

        let user = state
            .repos
            .users
            .find(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}

/// Rows that belong to a single user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Resolves a lookup into a row the caller may touch: missing → 404,
/// someone else's → 403.
pub fn authorize<T: Owned>(row: Option<T>, user_id: Uuid, what: &str) -> Result<T, AppError> {
    let row = row.ok_or_else(|| AppError::NotFound(format!("{what} not found")))?;
    if row.owner_id() != user_id {
        tracing::warn!("User {user_id} denied access to {what} owned by {}", row.owner_id());
        return Err(AppError::Forbidden);
    }
    Ok(row)
}

macro_rules! owned_by_user_id {
    ($($row:ty),+ $(,)?) => {
        $(impl Owned for $row {
            fn owner_id(&self) -> Uuid {
                self.user_id
            }
        })+
    };
}

owned_by_user_id!(
    crate::models::job_application::JobApplicationRow,
    crate::models::resume::ResumeRow,
    crate::models::research::CompanyResearchRow,
    crate::models::research::FinancialPlanRow,
    crate::models::linkedin::LinkedInProfileRow,
    crate::models::interview::InterviewRow,
);

impl Owned for crate::models::interview::InterviewWithQuestions {
    fn owner_id(&self) -> Uuid {
        self.interview.user_id
    }
}
