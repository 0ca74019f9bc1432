//! Chat-completions-backed implementation of the shared `scene_provider`
//! contract.
//!
//! This adapter translates `openai_api` transport results into the blocking
//! single-request generation contract expected by the session controller.

use std::sync::Arc;
use std::time::Duration;

use openai_api::{ChatMessage, ChatRequest, OpenAiApiClient, OpenAiApiConfig, OpenAiApiError};
use scene_provider::{GenerationError, ProviderInitError, ProviderProfile, SceneProvider, Turn};

/// Stable provider identifier used by startup selection.
pub const OPENAI_PROVIDER_ID: &str = "openai";

/// Model used when none is configured; the narrative service's default here.
pub const DEFAULT_MODEL_ID: &str = "gpt-4o-mini";

/// Runtime configuration for the chat-completions provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    pub model_id: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl OpenAiProviderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_id: model_id.into(),
            base_url: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_api_config(self) -> OpenAiApiConfig {
        let mut config = OpenAiApiConfig::new(self.api_key);

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait CompletionClient: Send + Sync {
    fn complete(&self, request: &ChatRequest) -> Result<String, OpenAiApiError>;
}

#[derive(Debug)]
struct DefaultCompletionClient {
    client: OpenAiApiClient,
}

impl CompletionClient for DefaultCompletionClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, OpenAiApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                OpenAiApiError::Unknown(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.complete(request))
    }
}

/// `SceneProvider` adapter backed by `openai_api` transport primitives.
pub struct OpenAiSceneProvider {
    model_id: String,
    completion_client: Arc<dyn CompletionClient>,
}

impl OpenAiSceneProvider {
    /// Creates a provider using real chat-completions transport.
    pub fn new(config: OpenAiProviderConfig) -> Result<Self, ProviderInitError> {
        let model_id = sanitize_model_id(config.model_id.clone());
        let completion_client = Arc::new(DefaultCompletionClient {
            client: OpenAiApiClient::new(config.into_api_config()).map_err(map_init_error)?,
        });

        Ok(Self {
            model_id,
            completion_client,
        })
    }

    #[cfg(test)]
    fn with_completion_client_for_tests(
        model_id: impl Into<String>,
        completion_client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            model_id: sanitize_model_id(model_id.into()),
            completion_client,
        }
    }
}

impl SceneProvider for OpenAiSceneProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: OPENAI_PROVIDER_ID.to_string(),
            model_id: self.model_id.clone(),
        }
    }

    fn generate(&self, context: &[Turn]) -> Result<String, GenerationError> {
        let request = ChatRequest::new(self.model_id.clone(), context_messages(context));

        let scene = self
            .completion_client
            .complete(&request)
            .map_err(map_generation_error)?;

        let scene = scene.trim();
        if scene.is_empty() {
            return Err(GenerationError::EmptyScene);
        }

        Ok(scene.to_string())
    }
}

fn context_messages(context: &[Turn]) -> Vec<ChatMessage> {
    context
        .iter()
        .map(|turn| match turn {
            Turn::Directive { text } => ChatMessage::system(text.clone()),
            Turn::Scene { text } => ChatMessage::assistant(text.clone()),
            Turn::Choice { text } => ChatMessage::user(text.clone()),
        })
        .collect()
}

fn map_generation_error(error: OpenAiApiError) -> GenerationError {
    match error {
        OpenAiApiError::EmptyCompletion => GenerationError::EmptyScene,
        OpenAiApiError::Serde(error) => GenerationError::MalformedResponse(error.to_string()),
        other => GenerationError::Transport(other.to_string()),
    }
}

fn sanitize_model_id(model_id: String) -> String {
    let trimmed = model_id.trim();
    if trimmed.is_empty() {
        DEFAULT_MODEL_ID.to_string()
    } else {
        trimmed.to_string()
    }
}

fn map_init_error(error: OpenAiApiError) -> ProviderInitError {
    ProviderInitError::new(format!("Failed to initialize openai provider: {error}"))
}
