use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
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

/// PostgreSQL implementation of every repository.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Spends one credit inside `tx`. The conditional decrement is what closes
/// the race between concurrent generations for the same user.
async fn apply_charge(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    charge: Charge,
) -> Result<(), StoreError> {
    if charge == Charge::Free {
        return Ok(());
    }

    let result = sqlx::query("UPDATE users SET credits = credits - 1 WHERE id = $1 AND credits > 0")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::InsufficientCredits);
    }
    Ok(())
}

fn expect_deleted(rows_affected: u64) -> Result<(), StoreError> {
    if rows_affected == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl JobApplicationRepository for PgStore {
    async fn create(&self, new: NewJobApplication) -> Result<JobApplicationRow, StoreError> {
        Ok(sqlx::query_as::<_, JobApplicationRow>(
            r#"
            INSERT INTO job_applications
                (id, user_id, job_title, company, job_description, location, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.job_title)
        .bind(&new.company)
        .bind(&new.job_description)
        .bind(&new.location)
        .bind(new.status.as_str())
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<JobApplicationRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, JobApplicationRow>("SELECT * FROM job_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<JobApplicationRow>, StoreError> {
        Ok(sqlx::query_as::<_, JobApplicationRow>(
            "SELECT * FROM job_applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update(
        &self,
        id: Uuid,
        update: &JobApplicationUpdate,
    ) -> Result<JobApplicationRow, StoreError> {
        sqlx::query_as::<_, JobApplicationRow>(
            r#"
            UPDATE job_applications SET
                job_title       = COALESCE($2, job_title),
                company         = COALESCE($3, company),
                job_description = COALESCE($4, job_description),
                location        = COALESCE($5, location),
                status          = COALESCE($6, status),
                notes           = COALESCE($7, notes),
                updated_at      = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.job_title)
        .bind(&update.company)
        .bind(&update.job_description)
        .bind(&update.location)
        .bind(update.status.map(|s| s.as_str()))
        .bind(&update.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected())
    }
}

#[async_trait]
impl InterviewRepository for PgStore {
    async fn create(
        &self,
        new: NewInterview,
        charge: Charge,
    ) -> Result<InterviewWithQuestions, StoreError> {
        let mut tx = self.pool.begin().await?;
        apply_charge(&mut tx, new.user_id, charge).await?;

        let interview = sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews (id, user_id, job_application_id, interview_type)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.job_application_id)
        .bind(new.interview_type.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let mut questions = Vec::with_capacity(new.questions.len());
        for (i, q) in new.questions.iter().enumerate() {
            let row = sqlx::query_as::<_, InterviewQuestionRow>(
                r#"
                INSERT INTO interview_questions
                    (id, interview_id, position, question, category, difficulty, guidance)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(interview.id)
            .bind(i as i32 + 1)
            .bind(&q.question)
            .bind(&q.category)
            .bind(&q.difficulty)
            .bind(&q.guidance)
            .fetch_one(&mut *tx)
            .await?;
            questions.push(row);
        }

        tx.commit().await?;
        info!(
            "Created interview {} with {} questions for user {}",
            interview.id,
            questions.len(),
            interview.user_id
        );

        Ok(InterviewWithQuestions {
            interview,
            questions,
        })
    }

    async fn find(&self, id: Uuid) -> Result<Option<InterviewWithQuestions>, StoreError> {
        let interview =
            sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(interview) = interview else {
            return Ok(None);
        };

        let questions = sqlx::query_as::<_, InterviewQuestionRow>(
            "SELECT * FROM interview_questions WHERE interview_id = $1 ORDER BY position ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(InterviewWithQuestions {
            interview,
            questions,
        }))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<InterviewRow>, StoreError> {
        Ok(sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn record_answer(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        record: AnswerRecord,
        charge: Charge,
    ) -> Result<InterviewQuestionRow, StoreError> {
        let mut tx = self.pool.begin().await?;
        apply_charge(&mut tx, user_id, charge).await?;

        let row = sqlx::query_as::<_, InterviewQuestionRow>(
            r#"
            UPDATE interview_questions
            SET answer = $2, feedback = $3, score = $4, answered_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(question_id)
        .bind(&record.answer)
        .bind(Json(&record.feedback))
        .bind(record.feedback.score)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        tx.commit().await?;
        info!("Recorded answer for question {question_id} (score {:?})", row.score);
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        // interview_questions rows cascade
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected())
    }
}

#[async_trait]
impl ResumeRepository for PgStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRow, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "INSERT INTO resumes (id, user_id, title, content) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.content)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ResumeRow>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn save_analysis(
        &self,
        user_id: Uuid,
        id: Uuid,
        analysis: &ResumeAnalysis,
        charge: Charge,
    ) -> Result<ResumeRow, StoreError> {
        let mut tx = self.pool.begin().await?;
        apply_charge(&mut tx, user_id, charge).await?;

        let row = sqlx::query_as::<_, ResumeRow>(
            "UPDATE resumes SET analysis = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(analysis))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        tx.commit().await?;
        info!("Saved analysis for resume {id}");
        Ok(row)
    }

    async fn save_optimization(
        &self,
        user_id: Uuid,
        id: Uuid,
        optimized: &OptimizedResume,
        charge: Charge,
    ) -> Result<ResumeRow, StoreError> {
        let mut tx = self.pool.begin().await?;
        apply_charge(&mut tx, user_id, charge).await?;

        let row = sqlx::query_as::<_, ResumeRow>(
            "UPDATE resumes SET optimized_content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(optimized))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        tx.commit().await?;
        info!("Saved optimized content for resume {id}");
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected())
    }
}

#[async_trait]
impl LinkedInProfileRepository for PgStore {
    async fn upsert(
        &self,
        user_id: Uuid,
        content: &LinkedInProfileContent,
        charge: Charge,
    ) -> Result<LinkedInProfileRow, StoreError> {
        let mut tx = self.pool.begin().await?;
        apply_charge(&mut tx, user_id, charge).await?;

        let row = sqlx::query_as::<_, LinkedInProfileRow>(
            r#"
            INSERT INTO linkedin_profiles
                (id, user_id, headline, about, experience_highlights, skills)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                headline              = EXCLUDED.headline,
                about                 = EXCLUDED.about,
                experience_highlights = EXCLUDED.experience_highlights,
                skills                = EXCLUDED.skills,
                updated_at            = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&content.headline)
        .bind(&content.about)
        .bind(&content.experience_highlights)
        .bind(&content.skills)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Upserted LinkedIn profile {} for user {user_id}", row.id);
        Ok(row)
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Option<LinkedInProfileRow>, StoreError> {
        Ok(sqlx::query_as::<_, LinkedInProfileRow>(
            "SELECT * FROM linkedin_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl CompanyResearchRepository for PgStore {
    async fn create(
        &self,
        new: NewCompanyResearch,
        charge: Charge,
    ) -> Result<CompanyResearchRow, StoreError> {
        let mut tx = self.pool.begin().await?;
        apply_charge(&mut tx, new.user_id, charge).await?;

        let row = sqlx::query_as::<_, CompanyResearchRow>(
            r#"
            INSERT INTO company_research
                (id, user_id, job_application_id, company, overview, culture,
                 recent_developments, interview_tips)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.job_application_id)
        .bind(&new.company)
        .bind(&new.briefing.overview)
        .bind(&new.briefing.culture)
        .bind(&new.briefing.recent_developments)
        .bind(&new.briefing.interview_tips)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Saved company research {} for {}", row.id, row.company);
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CompanyResearchRow>, StoreError> {
        Ok(sqlx::query_as::<_, CompanyResearchRow>(
            "SELECT * FROM company_research WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl FinancialPlanRepository for PgStore {
    async fn create(
        &self,
        new: NewFinancialPlan,
        charge: Charge,
    ) -> Result<FinancialPlanRow, StoreError> {
        let mut tx = self.pool.begin().await?;
        apply_charge(&mut tx, new.user_id, charge).await?;

        let row = sqlx::query_as::<_, FinancialPlanRow>(
            r#"
            INSERT INTO financial_plans
                (id, user_id, job_title, current_salary, target_salary, location, plan)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.job_title)
        .bind(new.current_salary)
        .bind(new.target_salary)
        .bind(&new.location)
        .bind(Json(&new.plan))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Saved financial plan {} for user {}", row.id, row.user_id);
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FinancialPlanRow>, StoreError> {
        Ok(sqlx::query_as::<_, FinancialPlanRow>(
            "SELECT * FROM financial_plans WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
