//! Generation Invoker — turns a `GenerationRequest` into one provider call
//! and extracts structured output from the response.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::generation::extract::extract_json;
use crate::generation::GenerationError;
use crate::llm_client::prompts::compose_system;
use crate::llm_client::{Completion, CompletionProvider, CompletionRequest, ToolSpec};
use crate::prompts::{ContentType, PromptTemplate};

/// Everything needed for one generation call. Built per action, dropped after use.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub content_type: ContentType,
    pub variables: BTreeMap<String, String>,
    /// When present the model is forced to call a tool with this argument schema.
    pub response_schema: Option<Value>,
    pub temperature: f32,
}

impl GenerationRequest {
    /// A structured request using the template's schema and temperature.
    pub fn structured(content_type: ContentType, variables: BTreeMap<String, String>) -> Self {
        let template = content_type.template();
        Self {
            content_type,
            variables,
            response_schema: Some((template.schema)()),
            temperature: template.temperature,
        }
    }

    pub fn template(&self) -> &'static PromptTemplate {
        self.content_type.template()
    }
}

/// Raw model output plus whatever could be parsed out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub raw: String,
    pub parsed: Option<Value>,
    pub failure: Option<GenerationError>,
}

impl GenerationResult {
    fn parsed(raw: String, value: Value) -> Self {
        Self {
            raw,
            parsed: Some(value),
            failure: None,
        }
    }

    fn failed(raw: String, error: GenerationError) -> Self {
        Self {
            raw,
            parsed: None,
            failure: Some(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none() && self.parsed.is_some()
    }

    pub fn error_reason(&self) -> Option<String> {
        self.failure.as_ref().map(|e| e.to_string())
    }
}

/// Stateless wrapper around the shared provider handle.
#[derive(Clone)]
pub struct Invoker {
    provider: Arc<dyn CompletionProvider>,
}

impl Invoker {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Calls the provider once.
    ///
    /// Provider failures are returned as `Err(ProviderUnavailable)`. Extraction
    /// failures come back inside the `GenerationResult` so the raw text stays
    /// available to the caller.
    pub async fn invoke(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let template = request.template();
        let user = template.render(&request.variables)?;

        let tool = request.response_schema.as_ref().map(|schema| ToolSpec {
            name: template.tool_name.to_string(),
            description: template.tool_description.to_string(),
            parameters: schema.clone(),
        });
        let structured = tool.is_some();

        let completion_request = CompletionRequest {
            system: compose_system(template.system, structured),
            user,
            tool,
            temperature: request.temperature,
        };

        debug!(content_type = %request.content_type, structured, "calling LLM provider");

        let completion = self
            .provider
            .complete(&completion_request)
            .await
            .map_err(|e| {
                error!(content_type = %request.content_type, "LLM provider call failed: {e}");
                GenerationError::ProviderUnavailable(e.to_string())
            })?;

        Ok(interpret(request.content_type, structured, completion))
    }
}

/// Tool-call arguments win; free text is only mined for JSON as a last resort.
fn interpret(content_type: ContentType, structured: bool, completion: Completion) -> GenerationResult {
    if let Some(arguments) = completion.tool_arguments {
        return match serde_json::from_str::<Value>(&arguments) {
            Ok(value) => GenerationResult::parsed(arguments, value),
            Err(e) => GenerationResult::failed(arguments, GenerationError::MalformedJson(e.to_string())),
        };
    }

    let Some(content) = completion.content else {
        return GenerationResult::failed(String::new(), GenerationError::NoStructuredOutput);
    };

    if structured {
        warn!(%content_type, "model answered without a tool call; extracting JSON from free text");
    }

    match extract_json(&content) {
        Ok(value) => GenerationResult::parsed(content, value),
        Err(e) => GenerationResult::failed(content, e),
    }
}
