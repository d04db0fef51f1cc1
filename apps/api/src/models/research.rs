use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyResearchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_application_id: Uuid,
    pub company: String,
    pub overview: String,
    pub culture: String,
    pub recent_developments: Vec<String>,
    pub interview_tips: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyBriefing {
    pub overview: String,
    pub culture: String,
    pub recent_developments: Vec<String>,
    pub interview_tips: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewCompanyResearch {
    pub user_id: Uuid,
    pub job_application_id: Uuid,
    pub company: String,
    pub briefing: CompanyBriefing,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinancialPlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub current_salary: f64,
    pub target_salary: f64,
    pub location: Option<String>,
    /// `FinancialPlanContent` as JSON.
    pub plan: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    pub low: f64,
    pub median: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialPlanContent {
    pub salary_range: SalaryRange,
    pub negotiation_strategy: String,
    pub talking_points: Vec<String>,
    pub monthly_budget: Vec<BudgetLine>,
    pub savings_goals: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewFinancialPlan {
    pub user_id: Uuid,
    pub job_title: String,
    pub current_salary: f64,
    pub target_salary: f64,
    pub location: Option<String>,
    pub plan: FinancialPlanContent,
}
