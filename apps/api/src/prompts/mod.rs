//! Prompt Library — one template per content type.
//!
//! Each template carries a system prompt, a user prompt with `{placeholder}`
//! variables, the tool (function) definition whose JSON schema describes the
//! required output, and the sampling temperature.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod career;
pub mod interview;
pub mod profile;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("unknown content type '{0}'")]
    UnknownContentType(String),

    #[error("template '{template}' is missing variable '{variable}'")]
    MissingVariable {
        template: ContentType,
        variable: String,
    },
}

/// Every kind of content the service asks the model to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    InterviewQuestions,
    AnswerFeedback,
    CompanyResearch,
    FinancialPlan,
    LinkedinProfile,
    ResumeAnalysis,
    ResumeOptimization,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::InterviewQuestions,
        ContentType::AnswerFeedback,
        ContentType::CompanyResearch,
        ContentType::FinancialPlan,
        ContentType::LinkedinProfile,
        ContentType::ResumeAnalysis,
        ContentType::ResumeOptimization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::InterviewQuestions => "interview_questions",
            ContentType::AnswerFeedback => "answer_feedback",
            ContentType::CompanyResearch => "company_research",
            ContentType::FinancialPlan => "financial_plan",
            ContentType::LinkedinProfile => "linkedin_profile",
            ContentType::ResumeAnalysis => "resume_analysis",
            ContentType::ResumeOptimization => "resume_optimization",
        }
    }

    pub fn template(&self) -> &'static PromptTemplate {
        match self {
            ContentType::InterviewQuestions => &interview::QUESTIONS_TEMPLATE,
            ContentType::AnswerFeedback => &interview::FEEDBACK_TEMPLATE,
            ContentType::CompanyResearch => &career::COMPANY_RESEARCH_TEMPLATE,
            ContentType::FinancialPlan => &career::FINANCIAL_PLAN_TEMPLATE,
            ContentType::LinkedinProfile => &profile::LINKEDIN_TEMPLATE,
            ContentType::ResumeAnalysis => &profile::RESUME_ANALYSIS_TEMPLATE,
            ContentType::ResumeOptimization => &profile::RESUME_OPTIMIZATION_TEMPLATE,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PromptError::UnknownContentType(s.to_string()))
    }
}

/// Static description of one generation prompt. Pure data.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub content_type: ContentType,
    pub system: &'static str,
    pub user: &'static str,
    pub tool_name: &'static str,
    pub tool_description: &'static str,
    /// Builds the JSON schema the tool arguments must satisfy.
    pub schema: fn() -> Value,
    pub temperature: f32,
}

impl PromptTemplate {
    /// Substitutes every `{name}` placeholder in the user prompt.
    ///
    /// Plain interpolation: variable values are inserted verbatim.
    pub fn render(&self, variables: &BTreeMap<String, String>) -> Result<String, PromptError> {
        if let Some(missing) = PLACEHOLDER
            .captures_iter(self.user)
            .map(|c| c[1].to_string())
            .find(|name| !variables.contains_key(name))
        {
            return Err(PromptError::MissingVariable {
                template: self.content_type,
                variable: missing,
            });
        }

        Ok(PLACEHOLDER
            .replace_all(self.user, |caps: &regex::Captures<'_>| {
                variables.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned())
    }

    /// Names of all placeholders the user prompt expects.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = PLACEHOLDER
            .captures_iter(self.user)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Stand-in for optional inputs the user left blank.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Builds a variable map for `render`. Blank values become `NOT_SPECIFIED`
/// so the prompt never contains an empty slot.
pub fn variables<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(name, value)| {
            let value = value.trim();
            let value = if value.is_empty() { NOT_SPECIFIED } else { value };
            (name.to_string(), value.to_string())
        })
        .collect()
}

/// Looks up the template for a content type name.
pub fn get_template(content_type: &str) -> Result<&'static PromptTemplate, PromptError> {
    Ok(content_type.parse::<ContentType>()?.template())
}
