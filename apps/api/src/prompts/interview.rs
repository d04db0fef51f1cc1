// Mock interview prompts: question generation and answer feedback.

use serde_json::{json, Value};

use super::{ContentType, PromptTemplate};

/// Number of questions every mock interview gets.
pub const QUESTION_COUNT: usize = 5;

pub const DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];

pub const QUESTIONS_SYSTEM: &str = "You are an experienced hiring manager and interview coach. \
    You design realistic interview questions tailored to a specific role and company.";

/// Replace: {interview_type}, {job_title}, {company}, {job_description}, {question_count}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Create a {interview_type} mock interview for the role below.

ROLE: {job_title}
COMPANY: {company}
JOB DESCRIPTION:
{job_description}

Return exactly {question_count} questions with this shape:
{
  "questions": [
    {
      "question": "Tell me about a time you resolved a conflict within your team.",
      "category": "teamwork",
      "difficulty": "medium",
      "guidance": "Use the STAR format and focus on your own actions."
    }
  ]
}

RULES:
1. Every question must fit the interview type "{interview_type}".
2. difficulty is exactly one of "easy", "medium", "hard". Mix difficulties.
3. category is a short lowercase label (e.g. "leadership", "system design").
4. guidance is one or two sentences telling the candidate what a strong answer covers."#;

pub const FEEDBACK_SYSTEM: &str = "You are a candid, supportive interview coach. \
    You score interview answers and give specific, actionable feedback.";

/// Replace: {interview_type}, {job_title}, {company}, {question}, {difficulty}, {answer}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate's answer in a {interview_type} interview for {job_title} at {company}.

QUESTION ({difficulty}):
{question}

CANDIDATE ANSWER:
{answer}

Return feedback with this shape:
{
  "score": 7,
  "strengths": ["Clear structure"],
  "improvements": ["Quantify the outcome"],
  "detailed_feedback": "Two to four sentences of specific feedback.",
  "sample_answer": "A concise model answer the candidate can learn from."
}

RULES:
1. score is an integer from 1 (poor) to 10 (excellent).
2. Judge only what the candidate actually said."#;

fn questions_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "minItems": QUESTION_COUNT,
                "maxItems": QUESTION_COUNT,
                "items": {
                    "type": "object",
                    "properties": {
                        "question": { "type": "string", "minLength": 1 },
                        "category": { "type": "string", "minLength": 1 },
                        "difficulty": { "type": "string", "enum": DIFFICULTIES },
                        "guidance": { "type": "string" }
                    },
                    "required": ["question", "category", "difficulty", "guidance"]
                }
            }
        },
        "required": ["questions"]
    })
}

fn feedback_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "score": { "type": "integer", "minimum": 1, "maximum": 10 },
            "strengths": { "type": "array", "items": { "type": "string" } },
            "improvements": { "type": "array", "items": { "type": "string" } },
            "detailed_feedback": { "type": "string", "minLength": 1 },
            "sample_answer": { "type": "string" }
        },
        "required": ["score", "strengths", "improvements", "detailed_feedback", "sample_answer"]
    })
}

pub const QUESTIONS_TEMPLATE: PromptTemplate = PromptTemplate {
    content_type: ContentType::InterviewQuestions,
    system: QUESTIONS_SYSTEM,
    user: QUESTIONS_PROMPT_TEMPLATE,
    tool_name: "record_interview_questions",
    tool_description: "Record the generated mock interview questions.",
    schema: questions_schema,
    temperature: 0.3,
};

pub const FEEDBACK_TEMPLATE: PromptTemplate = PromptTemplate {
    content_type: ContentType::AnswerFeedback,
    system: FEEDBACK_SYSTEM,
    user: FEEDBACK_PROMPT_TEMPLATE,
    tool_name: "record_answer_feedback",
    tool_description: "Record the score and feedback for one interview answer.",
    schema: feedback_schema,
    temperature: 0.2,
};
