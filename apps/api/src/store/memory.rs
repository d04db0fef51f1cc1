//! In-memory repositories for tests. One lock guards every table so a credit
//! charge and its entity write are applied together, like the Postgres
//! transaction.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
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
use crate::store::{
    Charge, CompanyResearchRepository, FinancialPlanRepository, InterviewRepository,
    JobApplicationRepository, LinkedInProfileRepository, ResumeRepository, StoreError,
    UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    applications: Vec<JobApplicationRow>,
    interviews: Vec<InterviewRow>,
    questions: Vec<InterviewQuestionRow>,
    resumes: Vec<ResumeRow>,
    linkedin: Vec<LinkedInProfileRow>,
    company_research: Vec<CompanyResearchRow>,
    financial_plans: Vec<FinancialPlanRow>,
}

impl Tables {
    fn charge(&mut self, user_id: Uuid, charge: Charge) -> Result<(), StoreError> {
        if charge == Charge::Free {
            return Ok(());
        }
        match self.users.get_mut(&user_id) {
            Some(user) if user.credits > 0 => {
                user.credits -= 1;
                Ok(())
            }
            _ => Err(StoreError::InsufficientCredits),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn insert_user(&self, credits: i32, subscription_status: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: format!("user-{}@example.com", self.tables().users.len() + 1),
            credits,
            subscription_status: subscription_status.to_string(),
            created_at: Utc::now(),
        };
        self.tables().users.insert(user.id, user.clone());
        user
    }

    pub fn credits(&self, user_id: Uuid) -> Option<i32> {
        self.tables().users.get(&user_id).map(|u| u.credits)
    }

    pub fn linkedin_count(&self) -> usize {
        self.tables().linkedin.len()
    }

    pub fn interview_count(&self) -> usize {
        self.tables().interviews.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.get(&id).cloned())
    }
}

#[async_trait]
impl JobApplicationRepository for MemoryStore {
    async fn create(&self, new: NewJobApplication) -> Result<JobApplicationRow, StoreError> {
        let now = Utc::now();
        let row = JobApplicationRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            job_title: new.job_title,
            company: new.company,
            job_description: new.job_description,
            location: new.location,
            status: new.status.as_str().to_string(),
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        self.tables().applications.push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: Uuid) -> Result<Option<JobApplicationRow>, StoreError> {
        Ok(self.tables().applications.iter().find(|a| a.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<JobApplicationRow>, StoreError> {
        Ok(self
            .tables()
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &JobApplicationUpdate,
    ) -> Result<JobApplicationRow, StoreError> {
        let mut tables = self.tables();
        let row = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(v) = &update.job_title {
            row.job_title = v.clone();
        }
        if let Some(v) = &update.company {
            row.company = v.clone();
        }
        if let Some(v) = &update.job_description {
            row.job_description = Some(v.clone());
        }
        if let Some(v) = &update.location {
            row.location = Some(v.clone());
        }
        if let Some(v) = update.status {
            row.status = v.as_str().to_string();
        }
        if let Some(v) = &update.notes {
            row.notes = Some(v.clone());
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let before = tables.applications.len();
        tables.applications.retain(|a| a.id != id);
        if tables.applications.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl InterviewRepository for MemoryStore {
    async fn create(
        &self,
        new: NewInterview,
        charge: Charge,
    ) -> Result<InterviewWithQuestions, StoreError> {
        let mut tables = self.tables();
        tables.charge(new.user_id, charge)?;

        let interview = InterviewRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            job_application_id: new.job_application_id,
            interview_type: new.interview_type.as_str().to_string(),
            created_at: Utc::now(),
        };
        let questions: Vec<InterviewQuestionRow> = new
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| InterviewQuestionRow {
                id: Uuid::new_v4(),
                interview_id: interview.id,
                position: i as i32 + 1,
                question: q.question,
                category: q.category,
                difficulty: q.difficulty,
                guidance: q.guidance,
                answer: None,
                feedback: None,
                score: None,
                answered_at: None,
            })
            .collect();

        tables.interviews.push(interview.clone());
        tables.questions.extend(questions.iter().cloned());
        Ok(InterviewWithQuestions {
            interview,
            questions,
        })
    }

    async fn find(&self, id: Uuid) -> Result<Option<InterviewWithQuestions>, StoreError> {
        let tables = self.tables();
        let Some(interview) = tables.interviews.iter().find(|i| i.id == id).cloned() else {
            return Ok(None);
        };
        let mut questions: Vec<_> = tables
            .questions
            .iter()
            .filter(|q| q.interview_id == id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.position);
        Ok(Some(InterviewWithQuestions {
            interview,
            questions,
        }))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<InterviewRow>, StoreError> {
        Ok(self
            .tables()
            .interviews
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn record_answer(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        record: AnswerRecord,
        charge: Charge,
    ) -> Result<InterviewQuestionRow, StoreError> {
        let mut tables = self.tables();
        if !tables.questions.iter().any(|q| q.id == question_id) {
            return Err(StoreError::NotFound);
        }
        tables.charge(user_id, charge)?;

        let feedback = serde_json::to_value(&record.feedback).unwrap_or(Value::Null);
        let row = tables
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or(StoreError::NotFound)?;
        row.answer = Some(record.answer);
        row.score = Some(record.feedback.score);
        row.feedback = Some(feedback);
        row.answered_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let before = tables.interviews.len();
        tables.interviews.retain(|i| i.id != id);
        if tables.interviews.len() == before {
            return Err(StoreError::NotFound);
        }
        tables.questions.retain(|q| q.interview_id != id);
        Ok(())
    }
}

#[async_trait]
impl ResumeRepository for MemoryStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRow, StoreError> {
        let now = Utc::now();
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            analysis: None,
            optimized_content: None,
            created_at: now,
            updated_at: now,
        };
        self.tables().resumes.push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ResumeRow>, StoreError> {
        Ok(self.tables().resumes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, StoreError> {
        Ok(self
            .tables()
            .resumes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn save_analysis(
        &self,
        user_id: Uuid,
        id: Uuid,
        analysis: &ResumeAnalysis,
        charge: Charge,
    ) -> Result<ResumeRow, StoreError> {
        let value = serde_json::to_value(analysis).unwrap_or(Value::Null);
        let mut tables = self.tables();
        if !tables.resumes.iter().any(|r| r.id == id) {
            return Err(StoreError::NotFound);
        }
        tables.charge(user_id, charge)?;
        let row = tables
            .resumes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        row.analysis = Some(value);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn save_optimization(
        &self,
        user_id: Uuid,
        id: Uuid,
        optimized: &OptimizedResume,
        charge: Charge,
    ) -> Result<ResumeRow, StoreError> {
        let value = serde_json::to_value(optimized).unwrap_or(Value::Null);
        let mut tables = self.tables();
        if !tables.resumes.iter().any(|r| r.id == id) {
            return Err(StoreError::NotFound);
        }
        tables.charge(user_id, charge)?;
        let row = tables
            .resumes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        row.optimized_content = Some(value);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let before = tables.resumes.len();
        tables.resumes.retain(|r| r.id != id);
        if tables.resumes.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LinkedInProfileRepository for MemoryStore {
    async fn upsert(
        &self,
        user_id: Uuid,
        content: &LinkedInProfileContent,
        charge: Charge,
    ) -> Result<LinkedInProfileRow, StoreError> {
        let mut tables = self.tables();
        tables.charge(user_id, charge)?;

        let now = Utc::now();
        if let Some(row) = tables.linkedin.iter_mut().find(|p| p.user_id == user_id) {
            row.headline = content.headline.clone();
            row.about = content.about.clone();
            row.experience_highlights = content.experience_highlights.clone();
            row.skills = content.skills.clone();
            row.updated_at = now;
            return Ok(row.clone());
        }

        let row = LinkedInProfileRow {
            id: Uuid::new_v4(),
            user_id,
            headline: content.headline.clone(),
            about: content.about.clone(),
            experience_highlights: content.experience_highlights.clone(),
            skills: content.skills.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.linkedin.push(row.clone());
        Ok(row)
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Option<LinkedInProfileRow>, StoreError> {
        Ok(self
            .tables()
            .linkedin
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl CompanyResearchRepository for MemoryStore {
    async fn create(
        &self,
        new: NewCompanyResearch,
        charge: Charge,
    ) -> Result<CompanyResearchRow, StoreError> {
        let mut tables = self.tables();
        tables.charge(new.user_id, charge)?;
        let row = CompanyResearchRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            job_application_id: new.job_application_id,
            company: new.company,
            overview: new.briefing.overview,
            culture: new.briefing.culture,
            recent_developments: new.briefing.recent_developments,
            interview_tips: new.briefing.interview_tips,
            created_at: Utc::now(),
        };
        tables.company_research.push(row.clone());
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CompanyResearchRow>, StoreError> {
        Ok(self
            .tables()
            .company_research
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FinancialPlanRepository for MemoryStore {
    async fn create(
        &self,
        new: NewFinancialPlan,
        charge: Charge,
    ) -> Result<FinancialPlanRow, StoreError> {
        let plan = serde_json::to_value(&new.plan).unwrap_or(Value::Null);
        let mut tables = self.tables();
        tables.charge(new.user_id, charge)?;
        let row = FinancialPlanRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            job_title: new.job_title,
            current_salary: new.current_salary,
            target_salary: new.target_salary,
            location: new.location,
            plan,
            created_at: Utc::now(),
        };
        tables.financial_plans.push(row.clone());
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FinancialPlanRow>, StoreError> {
        Ok(self
            .tables()
            .financial_plans
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn profile(headline: &str) -> LinkedInProfileContent {
        LinkedInProfileContent {
            headline: headline.to_string(),
            about: "About me".to_string(),
            experience_highlights: vec!["Shipped things".to_string()],
            skills: vec!["Rust".to_string()],
        }
    }

    #[tokio::test]
    async fn test_credit_charge_rejects_when_balance_is_zero() {
        let store = MemoryStore::new();
        let user = store.insert_user(0, "none");

        let err = store
            .upsert(user.id, &profile("Engineer"), Charge::Credit)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InsufficientCredits));
        assert_eq!(store.linkedin_count(), 0);
    }

    #[tokio::test]
    async fn test_free_charge_leaves_credits_untouched() {
        let store = MemoryStore::new();
        let user = store.insert_user(0, "active");

        store
            .upsert(user.id, &profile("Engineer"), Charge::Free)
            .await
            .unwrap();

        assert_eq!(store.credits(user.id), Some(0));
        assert_eq!(store.linkedin_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_charged_writes_spend_last_credit_once() {
        let store = Arc::new(MemoryStore::new());
        let user = store.insert_user(1, "none");

        let tasks: Vec<_> = (0..2)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .upsert(user.id, &profile(&format!("Engineer {i}")), Charge::Credit)
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(store.credits(user.id), Some(0));
    }
}
