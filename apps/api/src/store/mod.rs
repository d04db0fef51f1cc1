// Persistence seam. Each entity gets a narrow repository trait; handlers only
// see `Repositories`. Generation writes carry a `Charge` so the credit
// decrement and the entity write commit together or not at all.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::interview::{
    AnswerRecord, InterviewQuestionRow, InterviewRow, InterviewWithQuestions, NewInterview,
};
use crate::models::job_application::{JobApplicationRow, JobApplicationUpdate, NewJobApplication};
use crate::models::linkedin::{LinkedInProfileContent, LinkedInProfileRow};
use crate::models::research::{
    CompanyResearchRow, FinancialPlanRow, NewCompanyResearch, NewFinancialPlan,
};
use crate::models::resume::{NewResume, OptimizedResume, ResumeAnalysis, ResumeRow};
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("insufficient credits")]
    InsufficientCredits,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Whether a generation write spends one of the user's credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    Free,
    Credit,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait JobApplicationRepository: Send + Sync {
    async fn create(&self, new: NewJobApplication) -> Result<JobApplicationRow, StoreError>;
    async fn find(&self, id: Uuid) -> Result<Option<JobApplicationRow>, StoreError>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<JobApplicationRow>, StoreError>;
    async fn update(
        &self,
        id: Uuid,
        update: &JobApplicationUpdate,
    ) -> Result<JobApplicationRow, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Inserts the interview and all of its questions in one transaction.
    async fn create(
        &self,
        new: NewInterview,
        charge: Charge,
    ) -> Result<InterviewWithQuestions, StoreError>;
    async fn find(&self, id: Uuid) -> Result<Option<InterviewWithQuestions>, StoreError>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<InterviewRow>, StoreError>;
    async fn record_answer(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        record: AnswerRecord,
        charge: Charge,
    ) -> Result<InterviewQuestionRow, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn create(&self, new: NewResume) -> Result<ResumeRow, StoreError>;
    async fn find(&self, id: Uuid) -> Result<Option<ResumeRow>, StoreError>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, StoreError>;
    async fn save_analysis(
        &self,
        user_id: Uuid,
        id: Uuid,
        analysis: &ResumeAnalysis,
        charge: Charge,
    ) -> Result<ResumeRow, StoreError>;
    async fn save_optimization(
        &self,
        user_id: Uuid,
        id: Uuid,
        optimized: &OptimizedResume,
        charge: Charge,
    ) -> Result<ResumeRow, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait LinkedInProfileRepository: Send + Sync {
    /// Creates the user's profile or overwrites the existing one.
    async fn upsert(
        &self,
        user_id: Uuid,
        content: &LinkedInProfileContent,
        charge: Charge,
    ) -> Result<LinkedInProfileRow, StoreError>;
    async fn find_for_user(&self, user_id: Uuid) -> Result<Option<LinkedInProfileRow>, StoreError>;
}

#[async_trait]
pub trait CompanyResearchRepository: Send + Sync {
    async fn create(
        &self,
        new: NewCompanyResearch,
        charge: Charge,
    ) -> Result<CompanyResearchRow, StoreError>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CompanyResearchRow>, StoreError>;
}

#[async_trait]
pub trait FinancialPlanRepository: Send + Sync {
    async fn create(
        &self,
        new: NewFinancialPlan,
        charge: Charge,
    ) -> Result<FinancialPlanRow, StoreError>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FinancialPlanRow>, StoreError>;
}

/// All repositories, shared through `AppState`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub applications: Arc<dyn JobApplicationRepository>,
    pub interviews: Arc<dyn InterviewRepository>,
    pub resumes: Arc<dyn ResumeRepository>,
    pub linkedin: Arc<dyn LinkedInProfileRepository>,
    pub company_research: Arc<dyn CompanyResearchRepository>,
    pub financial_plans: Arc<dyn FinancialPlanRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool)))
    }

    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + JobApplicationRepository
            + InterviewRepository
            + ResumeRepository
            + LinkedInProfileRepository
            + CompanyResearchRepository
            + FinancialPlanRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            applications: store.clone(),
            interviews: store.clone(),
            resumes: store.clone(),
            linkedin: store.clone(),
            company_research: store.clone(),
            financial_plans: store,
        }
    }

    #[cfg(test)]
    pub fn memory(store: Arc<memory::MemoryStore>) -> Self {
        Self::from_store(store)
    }
}
