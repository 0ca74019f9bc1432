//! Startup provider selection.

use std::sync::Arc;

use scene_provider::{ProviderInitError, SceneProvider};
use scene_provider_mock::MockSceneProvider;
use scene_provider_openai::{OpenAiProviderConfig, OpenAiSceneProvider};

use crate::config::{ProcessContext, ProviderKind};

/// Constructs the scene provider the context selects.
pub fn provider_for_context(
    context: &ProcessContext,
) -> Result<Arc<dyn SceneProvider>, ProviderInitError> {
    match context.provider {
        ProviderKind::Mock => Ok(Arc::new(MockSceneProvider::default())),
        ProviderKind::OpenAi => {
            let api_key = context
                .api_key
                .clone()
                .ok_or_else(|| ProviderInitError::new("openai provider selected without a key"))?;

            let mut config = OpenAiProviderConfig::new(api_key, context.model_id.clone());
            if let Some(timeout) = context.timeout {
                config = config.with_timeout(timeout);
            }

            Ok(Arc::new(OpenAiSceneProvider::new(config)?))
        }
    }
}
