//! Mock fallback — deterministic stand-in output built from request variables.
//!
//! Only used when the policy is `FallbackPolicy::Mock`
//! (`GENERATION_MOCK_FALLBACK=true`). Production fails loudly.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::prompts::interview::{DIFFICULTIES, QUESTION_COUNT};
use crate::prompts::ContentType;

/// What to do when generation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Surface the error to the caller.
    #[default]
    Fail,
    /// Substitute deterministic mock output. Development and tests only.
    Mock,
}

fn var<'a>(variables: &'a BTreeMap<String, String>, name: &str, default: &'a str) -> &'a str {
    variables
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

/// Parses salary-like input ("85,000", "$85000") into a number.
fn money(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok().filter(|v| *v > 0.0)
}

/// Builds mock output for `content_type`. The result satisfies that content
/// type's schema.
pub fn mock_output(content_type: ContentType, variables: &BTreeMap<String, String>) -> Value {
    match content_type {
        ContentType::InterviewQuestions => mock_interview_questions(variables),
        ContentType::AnswerFeedback => mock_answer_feedback(variables),
        ContentType::CompanyResearch => mock_company_research(variables),
        ContentType::FinancialPlan => mock_financial_plan(variables),
        ContentType::LinkedinProfile => mock_linkedin_profile(variables),
        ContentType::ResumeAnalysis => mock_resume_analysis(variables),
        ContentType::ResumeOptimization => mock_resume_optimization(variables),
    }
}

fn mock_interview_questions(variables: &BTreeMap<String, String>) -> Value {
    let job_title = var(variables, "job_title", "this role");
    let company = var(variables, "company", "the company");
    let interview_type = var(variables, "interview_type", "general");

    let prompts = [
        (format!("Walk me through your background and why you want to be a {job_title} at {company}."), "motivation"),
        (format!("Describe a project that best prepares you for the {job_title} role."), "experience"),
        ("Tell me about a time you disagreed with a teammate. How did you resolve it?".to_string(), "teamwork"),
        (format!("What would you focus on in your first 90 days at {company}?"), "planning"),
        (format!("Describe the hardest problem you have solved that is relevant to a {interview_type} interview."), "problem solving"),
    ];
    // easy, medium, medium, hard, hard
    let difficulty_for = |i: usize| DIFFICULTIES[(i + 1) * DIFFICULTIES.len() / (QUESTION_COUNT + 1)];

    let questions: Vec<Value> = prompts
        .into_iter()
        .take(QUESTION_COUNT)
        .enumerate()
        .map(|(i, (question, category))| {
            json!({
                "question": question,
                "category": category,
                "difficulty": difficulty_for(i),
                "guidance": "Answer with a concrete example using the STAR format."
            })
        })
        .collect();

    json!({ "questions": questions })
}

fn mock_answer_feedback(variables: &BTreeMap<String, String>) -> Value {
    let answer = var(variables, "answer", "");
    let words = answer.split_whitespace().count();
    // Longer answers get a slightly better mock score, capped at 7.
    let score = (3 + words / 40).min(7);

    json!({
        "score": score,
        "strengths": ["You answered the question directly."],
        "improvements": [
            "Use the STAR format: situation, task, action, result.",
            "Quantify the outcome of your actions."
        ],
        "detailed_feedback": format!(
            "Your answer was {words} words long. Add a specific example and a measurable result to make it more convincing."
        ),
        "sample_answer": "In my previous role I faced a similar situation. I took ownership, aligned the team on a plan, and we delivered the result on time."
    })
}

fn mock_company_research(variables: &BTreeMap<String, String>) -> Value {
    let company = var(variables, "company", "The company");
    let job_title = var(variables, "job_title", "this role");

    json!({
        "overview": format!("{company} is hiring for {job_title}. Review the company website and recent annual reports for its products and customers."),
        "culture": format!("Read the job posting and employee reviews to understand how {company} works."),
        "recent_developments": [],
        "interview_tips": [
            format!("Prepare a clear answer to why you want to join {company}."),
            format!("Connect your experience to the main responsibilities of the {job_title} role."),
            "Prepare two thoughtful questions about the team and its priorities."
        ]
    })
}

fn mock_financial_plan(variables: &BTreeMap<String, String>) -> Value {
    let current = money(var(variables, "current_salary", "")).unwrap_or(60_000.0);
    let target = money(var(variables, "target_salary", "")).unwrap_or(current * 1.1);
    let low = current.min(target).round();
    let high = current.max(target).round();
    let median = ((low + high) / 2.0).round();
    let monthly = (target / 12.0).round();

    json!({
        "salary_range": { "low": low, "median": median, "high": high },
        "negotiation_strategy": format!("Anchor at {high} and justify it with market data and your recent results."),
        "talking_points": [
            "Recent measurable achievements",
            "Market rate for the role and location"
        ],
        "monthly_budget": [
            { "category": "Housing", "amount": (monthly * 0.3).round() },
            { "category": "Savings", "amount": (monthly * 0.2).round() },
            { "category": "Living expenses", "amount": (monthly * 0.5).round() }
        ],
        "savings_goals": ["Build a three-month emergency fund"]
    })
}

fn mock_linkedin_profile(variables: &BTreeMap<String, String>) -> Value {
    let current_role = var(variables, "current_role", "Professional");
    let target_role = var(variables, "target_role", current_role);
    let industry = var(variables, "industry", "technology");
    let skills: Vec<String> = var(variables, "skills", "")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let skills = if skills.is_empty() {
        vec!["Communication".to_string()]
    } else {
        skills
    };

    let headline: String = format!("{current_role} | Aspiring {target_role} | {industry}")
        .chars()
        .take(crate::prompts::profile::HEADLINE_MAX_CHARS)
        .collect();

    json!({
        "headline": headline,
        "about": format!("I am a {current_role} working in {industry}, focused on growing into a {target_role} role."),
        "experience_highlights": [],
        "skills": skills
    })
}

fn mock_resume_analysis(variables: &BTreeMap<String, String>) -> Value {
    let resume = var(variables, "resume_content", "");
    let words = resume.split_whitespace().count();
    let score = if words >= 300 { 65 } else { 50 };

    json!({
        "overall_score": score,
        "ats_compatibility": "medium",
        "strengths": ["Resume content was provided for review."],
        "weaknesses": ["Automated analysis was unavailable; this is a placeholder review."],
        "missing_keywords": [],
        "recommendations": [
            "Quantify achievements with numbers.",
            "Mirror the wording of the job description where it is accurate."
        ]
    })
}

fn mock_resume_optimization(variables: &BTreeMap<String, String>) -> Value {
    let resume = var(variables, "resume_content", "");
    let job_title = var(variables, "job_title", "the target role");
    let lines: Vec<&str> = resume
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    json!({
        "summary": format!("Candidate targeting {job_title}."),
        "sections": [{ "heading": "Resume", "items": lines }],
        "keywords_added": [],
        "change_notes": ["Placeholder output: the original resume is returned unchanged."]
    })
}
