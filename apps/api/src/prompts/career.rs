// Company research and financial planning prompts.

use serde_json::{json, Value};

use super::{ContentType, PromptTemplate};

pub const COMPANY_RESEARCH_SYSTEM: &str = "You are a career researcher who prepares candidates \
    for interviews with concise, well-organised company briefings.";

/// Replace: {company}, {job_title}, {job_description}
pub const COMPANY_RESEARCH_PROMPT_TEMPLATE: &str = r#"Prepare a company briefing for a candidate interviewing at {company} for the role of {job_title}.

JOB DESCRIPTION:
{job_description}

Return a briefing with this shape:
{
  "overview": "What the company does, who its customers are, and its market position.",
  "culture": "Values and working style signalled by the company and this posting.",
  "recent_developments": ["Product launch or strategic change worth mentioning"],
  "interview_tips": ["Specific preparation advice for this company and role"]
}

RULES:
1. Prefer what the job description says over general knowledge.
2. Give 3 to 5 interview_tips."#;

pub const FINANCIAL_PLAN_SYSTEM: &str = "You are a compensation analyst and personal finance coach. \
    You help candidates set salary targets and plan their finances around a job change.";

/// Replace: {job_title}, {location}, {current_salary}, {target_salary}
pub const FINANCIAL_PLAN_PROMPT_TEMPLATE: &str = r#"Build a compensation and financial plan for a candidate.

TARGET ROLE: {job_title}
LOCATION: {location}
CURRENT SALARY: {current_salary}
TARGET SALARY: {target_salary}

Return a plan with this shape:
{
  "salary_range": {"low": 90000, "median": 105000, "high": 120000},
  "negotiation_strategy": "How to anchor and justify the target number.",
  "talking_points": ["Evidence the candidate can cite during negotiation"],
  "monthly_budget": [{"category": "Housing", "amount": 2000}],
  "savings_goals": ["Build a three-month emergency fund"]
}

RULES:
1. Salary figures are annual amounts in the same currency as the inputs.
2. low <= median <= high."#;

fn company_research_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "overview": { "type": "string", "minLength": 1 },
            "culture": { "type": "string", "minLength": 1 },
            "recent_developments": { "type": "array", "items": { "type": "string" } },
            "interview_tips": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string", "minLength": 1 }
            }
        },
        "required": ["overview", "culture", "recent_developments", "interview_tips"]
    })
}

fn financial_plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "salary_range": {
                "type": "object",
                "properties": {
                    "low": { "type": "number", "minimum": 0 },
                    "median": { "type": "number", "minimum": 0 },
                    "high": { "type": "number", "minimum": 0 }
                },
                "required": ["low", "median", "high"]
            },
            "negotiation_strategy": { "type": "string", "minLength": 1 },
            "talking_points": { "type": "array", "items": { "type": "string" } },
            "monthly_budget": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "minLength": 1 },
                        "amount": { "type": "number", "minimum": 0 }
                    },
                    "required": ["category", "amount"]
                }
            },
            "savings_goals": { "type": "array", "items": { "type": "string" } }
        },
        "required": [
            "salary_range",
            "negotiation_strategy",
            "talking_points",
            "monthly_budget",
            "savings_goals"
        ]
    })
}

pub const COMPANY_RESEARCH_TEMPLATE: PromptTemplate = PromptTemplate {
    content_type: ContentType::CompanyResearch,
    system: COMPANY_RESEARCH_SYSTEM,
    user: COMPANY_RESEARCH_PROMPT_TEMPLATE,
    tool_name: "record_company_research",
    tool_description: "Record the company briefing.",
    schema: company_research_schema,
    temperature: 0.2,
};

pub const FINANCIAL_PLAN_TEMPLATE: PromptTemplate = PromptTemplate {
    content_type: ContentType::FinancialPlan,
    system: FINANCIAL_PLAN_SYSTEM,
    user: FINANCIAL_PLAN_PROMPT_TEMPLATE,
    tool_name: "record_financial_plan",
    tool_description: "Record the compensation and financial plan.",
    schema: financial_plan_schema,
    temperature: 0.1,
};
