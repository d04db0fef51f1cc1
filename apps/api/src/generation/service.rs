//! Generator — runs one generation end to end for a content type.
//!
//! Idle → Requested → ProviderCalled → Validated, or
//! Failed → (error surfaced | mock substituted), depending on `FallbackPolicy`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::generation::fallback::{mock_output, FallbackPolicy};
use crate::generation::invoker::{GenerationRequest, Invoker};
use crate::generation::validator::{conform, validate, ValidatedOutput};
use crate::generation::{GenerationError, GenerationErrorKind, OutputSource};
use crate::llm_client::CompletionProvider;
use crate::prompts::ContentType;

/// Typed generation output and where it came from.
#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub content: T,
    pub source: OutputSource,
}

impl<T> Generated<T> {
    pub fn is_mock(&self) -> bool {
        self.source == OutputSource::Mock
    }
}

#[derive(Clone)]
pub struct Generator {
    invoker: Invoker,
    policy: FallbackPolicy,
}

impl Generator {
    pub fn new(provider: Arc<dyn CompletionProvider>, policy: FallbackPolicy) -> Self {
        Self {
            invoker: Invoker::new(provider),
            policy,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Generates `content_type` from `variables` and deserializes it into `T`.
    pub async fn generate<T: DeserializeOwned>(
        &self,
        content_type: ContentType,
        variables: BTreeMap<String, String>,
    ) -> Result<Generated<T>, GenerationError> {
        let request = GenerationRequest::structured(content_type, variables);
        info!(%content_type, "generation requested");

        match self.attempt(&request).await {
            Ok(content) => {
                info!(%content_type, "generation validated");
                Ok(Generated {
                    content,
                    source: OutputSource::Model,
                })
            }
            Err(error) => self.fall_back(&request, error),
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
    ) -> Result<T, GenerationError> {
        let result = self.invoker.invoke(request).await?;
        validate(request.content_type, &result, request.response_schema.as_ref())
            .inspect_err(|e| {
                warn!(
                    content_type = %request.content_type,
                    raw_len = result.raw.len(),
                    "generation output rejected: {e}"
                )
            })?
            .into_typed()
    }

    fn fall_back<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
        error: GenerationError,
    ) -> Result<Generated<T>, GenerationError> {
        // Prompt errors are programming mistakes; never paper over them.
        if self.policy == FallbackPolicy::Fail || error.kind() == GenerationErrorKind::Prompt {
            return Err(error);
        }

        warn!(
            content_type = %request.content_type,
            "generation failed ({error}); substituting mock output"
        );

        let mock = mock_output(request.content_type, &request.variables);
        let value = match &request.response_schema {
            Some(schema) => conform(mock, schema),
            None => Ok(mock),
        };

        value
            .and_then(|value| {
                ValidatedOutput {
                    content_type: request.content_type,
                    value,
                    source: OutputSource::Mock,
                }
                .into_typed()
            })
            .map(|content| Generated {
                content,
                source: OutputSource::Mock,
            })
            .map_err(|mock_error| {
                warn!(content_type = %request.content_type, "mock output rejected: {mock_error}");
                error
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::ScriptedProvider;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Research {
        overview: String,
        interview_tips: Vec<String>,
    }

    fn vars() -> BTreeMap<String, String> {
        [
            ("company", "Acme"),
            ("job_title", "Senior Engineer"),
            ("job_description", "Own the billing platform."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn valid_research() -> serde_json::Value {
        json!({
            "overview": "Acme builds billing software.",
            "culture": "Fast and collaborative.",
            "recent_developments": ["Launched v2"],
            "interview_tips": ["Study the billing domain"]
        })
    }

    fn generator(provider: Arc<ScriptedProvider>, policy: FallbackPolicy) -> Generator {
        Generator::new(provider, policy)
    }

    #[tokio::test]
    async fn test_model_output_is_typed() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.reply_with_tool(valid_research());

        let out: Generated<Research> = generator(provider, FallbackPolicy::Fail)
            .generate(ContentType::CompanyResearch, vars())
            .await
            .unwrap();

        assert_eq!(out.source, OutputSource::Model);
        assert_eq!(out.content.overview, "Acme builds billing software.");
        assert_eq!(out.content.interview_tips.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_policy_surfaces_malformed_json() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.reply_with_raw_tool("{not json");

        let err = generator(provider, FallbackPolicy::Fail)
            .generate::<Research>(ContentType::CompanyResearch, vars())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), GenerationErrorKind::MalformedJson);
    }

    #[tokio::test]
    async fn test_fail_policy_surfaces_schema_violation() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.reply_with_tool(json!({"overview": "only this"}));

        let err = generator(provider, FallbackPolicy::Fail)
            .generate::<Research>(ContentType::CompanyResearch, vars())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), GenerationErrorKind::SchemaViolation);
    }

    #[tokio::test]
    async fn test_mock_policy_substitutes_mock_on_provider_outage() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.fail();

        let out = generator(provider, FallbackPolicy::Mock)
            .generate::<Research>(ContentType::CompanyResearch, vars())
            .await
            .unwrap();

        assert!(out.is_mock());
        assert!(out.content.overview.contains("Acme"));
    }

    #[tokio::test]
    async fn test_mock_policy_substitutes_mock_on_no_structured_output() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.reply_with_text("Sorry, no.");

        let out = generator(provider, FallbackPolicy::Mock)
            .generate::<Research>(ContentType::CompanyResearch, vars())
            .await
            .unwrap();

        assert_eq!(out.source, OutputSource::Mock);
    }

    #[tokio::test]
    async fn test_mock_policy_never_hides_prompt_errors() {
        let provider = Arc::new(ScriptedProvider::new());

        let err = generator(provider.clone(), FallbackPolicy::Mock)
            .generate::<Research>(ContentType::CompanyResearch, BTreeMap::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), GenerationErrorKind::Prompt);
        assert_eq!(provider.call_count(), 0);
    }
}
