use serde::Deserialize;
use tracing::info;

use crate::billing::{charge_for, ensure_can_generate};
use crate::errors::AppError;
use crate::models::linkedin::{LinkedInProfileContent, LinkedInProfileRow};
use crate::models::user::User;
use crate::prompts::{variables, ContentType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateLinkedInProfileRequest {
    pub current_role: String,
    pub target_role: Option<String>,
    pub industry: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_summary: String,
}

pub async fn generate_linkedin_profile(
    state: &AppState,
    user: &User,
    req: GenerateLinkedInProfileRequest,
) -> Result<LinkedInProfileRow, AppError> {
    if req.current_role.trim().is_empty() {
        return Err(AppError::Validation("current_role must not be empty".to_string()));
    }
    if req.experience_summary.trim().is_empty() {
        return Err(AppError::Validation(
            "experience_summary must not be empty".to_string(),
        ));
    }
    let charge = ensure_can_generate(user)?;

    let skills: Vec<&str> = req
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let generated = state
        .generator
        .generate::<LinkedInProfileContent>(
            ContentType::LinkedinProfile,
            variables([
                ("current_role", req.current_role.clone()),
                ("target_role", req.target_role.clone().unwrap_or_default()),
                ("industry", req.industry.clone().unwrap_or_default()),
                ("skills", skills.join(", ")),
                ("experience_summary", req.experience_summary.clone()),
            ]),
        )
        .await?;

    let charge = charge_for(charge, &generated);
    let row = state
        .repos
        .linkedin
        .upsert(user.id, &generated.content, charge)
        .await?;

    info!("LinkedIn profile {} saved for user {}", row.id, user.id);
    Ok(row)
}

pub async fn get_linkedin_profile(
    state: &AppState,
    user: &User,
) -> Result<LinkedInProfileRow, AppError> {
    state
        .repos
        .linkedin
        .find_for_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("LinkedIn profile not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::TestApp;
    use serde_json::json;

    fn request() -> GenerateLinkedInProfileRequest {
        GenerateLinkedInProfileRequest {
            current_role: "Backend Engineer".to_string(),
            target_role: Some("Staff Engineer".to_string()),
            industry: None,
            skills: vec!["Rust".to_string(), " ".to_string(), "Postgres".to_string()],
            experience_summary: "Eight years building APIs.".to_string(),
        }
    }

    fn profile_reply(headline: &str) -> serde_json::Value {
        json!({
            "headline": headline,
            "about": "I build reliable backend systems.",
            "experience_highlights": ["Cut p99 latency by 40%"],
            "skills": ["Rust", "Postgres"]
        })
    }

    #[tokio::test]
    async fn test_generating_twice_keeps_one_profile() {
        let app = TestApp::new();
        let user = app.store.insert_user(2, "none");
        app.provider.reply_with_tool(profile_reply("Backend Engineer | Rust"));
        app.provider.reply_with_tool(profile_reply("Staff-track Engineer | Rust"));

        let first = generate_linkedin_profile(&app.state, &user, request())
            .await
            .unwrap();
        let second = generate_linkedin_profile(&app.state, &user, request())
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(app.store.linkedin_count(), 1);
        let stored = get_linkedin_profile(&app.state, &user).await.unwrap();
        assert_eq!(stored.headline, "Staff-track Engineer | Rust");
        assert_eq!(app.store.credits(user.id), Some(0));
    }

    #[tokio::test]
    async fn test_prompt_lists_skills_and_fills_blanks() {
        let app = TestApp::new();
        let user = app.store.insert_user(1, "none");
        app.provider.reply_with_tool(profile_reply("Backend Engineer"));

        generate_linkedin_profile(&app.state, &user, request())
            .await
            .unwrap();

        let prompt = app.provider.last_request().unwrap().user;
        assert!(prompt.contains("Rust, Postgres"));
        assert!(prompt.contains(crate::prompts::NOT_SPECIFIED));
    }

    #[tokio::test]
    async fn test_over_long_headline_is_rejected() {
        let app = TestApp::new();
        let user = app.store.insert_user(1, "none");
        app.provider.reply_with_tool(profile_reply(&"x".repeat(300)));

        let err = generate_linkedin_profile(&app.state, &user, request())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "GENERATION_SCHEMA_VIOLATION");
        assert_eq!(app.store.linkedin_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let app = TestApp::new();
        let user = app.store.insert_user(1, "none");
        let err = get_linkedin_profile(&app.state, &user).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
