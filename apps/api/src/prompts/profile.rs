// LinkedIn profile and resume prompts.

use serde_json::{json, Value};

use super::{ContentType, PromptTemplate};

/// LinkedIn rejects headlines longer than this.
pub const HEADLINE_MAX_CHARS: usize = 220;

pub const ATS_LEVELS: [&str; 3] = ["low", "medium", "high"];

pub const LINKEDIN_SYSTEM: &str = "You are a LinkedIn branding specialist. \
    You write profiles that are specific, keyword-rich and written in the first person.";

/// Replace: {current_role}, {target_role}, {industry}, {skills}, {experience_summary}
pub const LINKEDIN_PROMPT_TEMPLATE: &str = r#"Write a LinkedIn profile for this professional.

CURRENT ROLE: {current_role}
TARGET ROLE: {target_role}
INDUSTRY: {industry}
SKILLS: {skills}
EXPERIENCE SUMMARY:
{experience_summary}

Return a profile with this shape:
{
  "headline": "Senior Backend Engineer | Distributed Systems | Payments",
  "about": "First-person summary of 3 short paragraphs.",
  "experience_highlights": ["Achievement-focused bullet drawn from the experience summary"],
  "skills": ["Rust", "PostgreSQL"]
}

RULES:
1. headline is at most 220 characters.
2. skills lists 5 to 15 items, most relevant to the target role first."#;

pub const RESUME_ANALYSIS_SYSTEM: &str = "You are a senior technical recruiter and ATS expert. \
    You review resumes honestly and explain exactly what to fix.";

/// Replace: {job_title}, {company}, {job_description}, {resume_content}
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyse the resume below against the target role.

TARGET ROLE: {job_title}
COMPANY: {company}
JOB DESCRIPTION:
{job_description}

RESUME:
{resume_content}

Return an analysis with this shape:
{
  "overall_score": 72,
  "ats_compatibility": "medium",
  "strengths": ["Quantified impact in most bullets"],
  "weaknesses": ["Summary is generic"],
  "missing_keywords": ["Kubernetes"],
  "recommendations": ["Add a skills section listing cloud tooling"]
}

RULES:
1. overall_score is an integer from 0 to 100.
2. ats_compatibility is exactly one of "low", "medium", "high".
3. If no job description is given, judge the resume for the target role in general."#;

pub const RESUME_OPTIMIZATION_SYSTEM: &str = "You are an expert resume writer. \
    You rewrite resumes to target a specific role without adding facts that are not in the original.";

/// Replace: {job_title}, {company}, {job_description}, {resume_content}
pub const RESUME_OPTIMIZATION_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below for the target role.

TARGET ROLE: {job_title}
COMPANY: {company}
JOB DESCRIPTION:
{job_description}

ORIGINAL RESUME:
{resume_content}

Return the optimised resume with this shape:
{
  "summary": "Two to three sentence professional summary aimed at the role.",
  "sections": [
    {"heading": "Experience", "items": ["Rewritten bullet keeping the original facts"]}
  ],
  "keywords_added": ["Kubernetes"],
  "change_notes": ["Moved skills above education"]
}

RULES:
1. Keep every employer, title, date and metric from the original unchanged.
2. Only add keywords the original resume supports."#;

fn linkedin_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "headline": { "type": "string", "minLength": 1, "maxLength": HEADLINE_MAX_CHARS },
            "about": { "type": "string", "minLength": 1 },
            "experience_highlights": { "type": "array", "items": { "type": "string" } },
            "skills": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string", "minLength": 1 }
            }
        },
        "required": ["headline", "about", "experience_highlights", "skills"]
    })
}

fn resume_analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "overall_score": { "type": "integer", "minimum": 0, "maximum": 100 },
            "ats_compatibility": { "type": "string", "enum": ATS_LEVELS },
            "strengths": { "type": "array", "items": { "type": "string" } },
            "weaknesses": { "type": "array", "items": { "type": "string" } },
            "missing_keywords": { "type": "array", "items": { "type": "string" } },
            "recommendations": { "type": "array", "items": { "type": "string" } }
        },
        "required": [
            "overall_score",
            "ats_compatibility",
            "strengths",
            "weaknesses",
            "missing_keywords",
            "recommendations"
        ]
    })
}

fn resume_optimization_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string", "minLength": 1 },
            "sections": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "heading": { "type": "string", "minLength": 1 },
                        "items": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["heading", "items"]
                }
            },
            "keywords_added": { "type": "array", "items": { "type": "string" } },
            "change_notes": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["summary", "sections", "keywords_added", "change_notes"]
    })
}

pub const LINKEDIN_TEMPLATE: PromptTemplate = PromptTemplate {
    content_type: ContentType::LinkedinProfile,
    system: LINKEDIN_SYSTEM,
    user: LINKEDIN_PROMPT_TEMPLATE,
    tool_name: "record_linkedin_profile",
    tool_description: "Record the generated LinkedIn profile.",
    schema: linkedin_schema,
    temperature: 0.3,
};

pub const RESUME_ANALYSIS_TEMPLATE: PromptTemplate = PromptTemplate {
    content_type: ContentType::ResumeAnalysis,
    system: RESUME_ANALYSIS_SYSTEM,
    user: RESUME_ANALYSIS_PROMPT_TEMPLATE,
    tool_name: "record_resume_analysis",
    tool_description: "Record the resume analysis.",
    schema: resume_analysis_schema,
    temperature: 0.0,
};

pub const RESUME_OPTIMIZATION_TEMPLATE: PromptTemplate = PromptTemplate {
    content_type: ContentType::ResumeOptimization,
    system: RESUME_OPTIMIZATION_SYSTEM,
    user: RESUME_OPTIMIZATION_PROMPT_TEMPLATE,
    tool_name: "record_optimized_resume",
    tool_description: "Record the optimised resume.",
    schema: resume_optimization_schema,
    temperature: 0.2,
};
