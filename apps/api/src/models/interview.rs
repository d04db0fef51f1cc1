use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Kinds of mock interview a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Behavioral,
    Technical,
    SystemDesign,
    CaseStudy,
    General,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Behavioral => "behavioral",
            InterviewType::Technical => "technical",
            InterviewType::SystemDesign => "system_design",
            InterviewType::CaseStudy => "case_study",
            InterviewType::General => "general",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_application_id: Uuid,
    pub interview_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewQuestionRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub position: i32,
    pub question: String,
    pub category: String,
    pub difficulty: String,
    pub guidance: String,
    pub answer: Option<String>,
    pub feedback: Option<Value>,
    pub score: Option<i32>,
    pub answered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewWithQuestions {
    #[serde(flatten)]
    pub interview: InterviewRow,
    pub questions: Vec<InterviewQuestionRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generated content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub category: String,
    /// "easy" | "medium" | "hard"
    pub difficulty: String,
    pub guidance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuestions {
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFeedback {
    /// 1–10
    pub score: i32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub detailed_feedback: String,
    pub sample_answer: String,
}

#[derive(Debug, Clone)]
pub struct NewInterview {
    pub user_id: Uuid,
    pub job_application_id: Uuid,
    pub interview_type: InterviewType,
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub answer: String,
    pub feedback: AnswerFeedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_type_serde() {
        let kind: InterviewType = serde_json::from_str(r#""system_design""#).unwrap();
        assert_eq!(kind, InterviewType::SystemDesign);
        assert_eq!(InterviewType::Behavioral.as_str(), "behavioral");
    }

    #[test]
    fn test_interview_with_questions_flattens_interview_fields() {
        let interview = InterviewRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_application_id: Uuid::new_v4(),
            interview_type: "behavioral".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(InterviewWithQuestions {
            interview,
            questions: vec![],
        })
        .unwrap();
        assert_eq!(json["interview_type"], "behavioral");
        assert!(json["questions"].as_array().unwrap().is_empty());
    }
}
