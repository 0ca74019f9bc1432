//! Process configuration resolved once at startup.
//!
//! Everything the session needs from the environment is gathered into a
//! single [`ProcessContext`] and passed explicitly; nothing downstream reads
//! ambient global state.

use std::time::Duration;

use scene_provider_openai::DEFAULT_MODEL_ID;
use thiserror::Error;

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const PROVIDER_ENV_VAR: &str = "DREADHALL_PROVIDER";
pub const MODEL_ENV_VAR: &str = "DREADHALL_MODEL";
pub const DIRECTIVE_ENV_VAR: &str = "DREADHALL_DIRECTIVE";
pub const TIMEOUT_ENV_VAR: &str = "DREADHALL_TIMEOUT_SECS";

/// The narrator's standing instructions, used unless overridden.
pub const DEFAULT_DIRECTIVE: &str = "You are the game master of a horror text adventure. \
    Every response continues the story and ends by offering the player choices. \
    Number the choices and keep them unambiguous. \
    Build dread through concrete detail and mounting tension.";

/// Which scene provider to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Mock,
}

/// Startup configuration, built once and handed to provider construction
/// and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessContext {
    pub provider: ProviderKind,
    /// Present whenever the selected provider needs a credential.
    pub api_key: Option<String>,
    pub model_id: String,
    pub directive: String,
    pub timeout: Option<Duration>,
}

/// Startup-fatal configuration failure; the session never begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set; the narrative service needs a credential")]
    MissingApiKey,
    #[error("unsupported provider '{0}'; available providers: openai, mock")]
    UnknownProvider(String),
    #[error("DREADHALL_TIMEOUT_SECS must be a whole number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

impl ProcessContext {
    /// Resolves the context from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        resolve_context(
            env_var(PROVIDER_ENV_VAR),
            env_var(API_KEY_ENV_VAR),
            env_var(MODEL_ENV_VAR),
            env_var(DIRECTIVE_ENV_VAR),
            env_var(TIMEOUT_ENV_VAR),
        )
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Pure resolution from already-read environment values; `from_env` is the
/// thin impure wrapper over this.
pub fn resolve_context(
    provider: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    directive: Option<String>,
    timeout_secs: Option<String>,
) -> Result<ProcessContext, ConfigError> {
    let provider = match provider.as_deref() {
        None | Some("openai") => ProviderKind::OpenAi,
        Some("mock") => ProviderKind::Mock,
        Some(unknown) => return Err(ConfigError::UnknownProvider(unknown.to_string())),
    };

    let api_key = match provider {
        ProviderKind::OpenAi => Some(api_key.ok_or(ConfigError::MissingApiKey)?),
        ProviderKind::Mock => None,
    };

    let timeout = match timeout_secs {
        None => None,
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => return Err(ConfigError::InvalidTimeout(raw)),
        },
    };

    Ok(ProcessContext {
        provider,
        api_key,
        model_id: model.unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
        directive: directive.unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string()),
        timeout,
    })
}
