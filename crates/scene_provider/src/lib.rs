//! Minimal provider-agnostic contract for generating one narrative scene.
//!
//! This crate intentionally defines only the shared turn history and the
//! scene-generation contract types. It excludes provider transport details,
//! protocol payloads, and rendering concerns.

use std::fmt;

use thiserror::Error;

/// One atomic unit of the narrative transcript.
///
/// Turns are immutable once appended to a transcript; each variant carries a
/// single ordered string payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// The fixed instruction establishing the narrator's role. Always the
    /// first turn of a transcript.
    Directive { text: String },
    /// A generated scene.
    Scene { text: String },
    /// A free-text player choice.
    Choice { text: String },
}

impl Turn {
    /// Constructs a directive turn.
    #[must_use]
    pub fn directive(text: impl Into<String>) -> Self {
        Self::Directive { text: text.into() }
    }

    /// Constructs a scene turn.
    #[must_use]
    pub fn scene(text: impl Into<String>) -> Self {
        Self::Scene { text: text.into() }
    }

    /// Constructs a player-choice turn.
    #[must_use]
    pub fn choice(text: impl Into<String>) -> Self {
        Self::Choice { text: text.into() }
    }

    /// Returns the variant discriminant.
    #[must_use]
    pub fn kind(&self) -> TurnKind {
        match self {
            Self::Directive { .. } => TurnKind::Directive,
            Self::Scene { .. } => TurnKind::Scene,
            Self::Choice { .. } => TurnKind::Choice,
        }
    }

    /// Returns the turn's text payload.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Directive { text } | Self::Scene { text } | Self::Choice { text } => text,
        }
    }
}

/// Discriminant for [`Turn`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Directive,
    Scene,
    Choice,
}

impl TurnKind {
    /// Returns a stable lowercase name for diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directive => "directive",
            Self::Scene => "scene",
            Self::Choice => "choice",
        }
    }
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised while generating a scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request never produced a usable response (connection, status, or
    /// protocol failure).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered, but the response did not carry the expected
    /// shape.
    #[error("malformed generator response: {0}")]
    MalformedResponse(String),
    /// The service answered with no scene content.
    #[error("generator returned an empty scene")]
    EmptyScene,
}

/// Error returned while constructing/configuring a provider before any scene
/// is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitError {
    message: String,
}

impl ProviderInitError {
    /// Creates a new provider initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderInitError {}

impl From<String> for ProviderInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProviderInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Immutable metadata describing a scene provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub model_id: String,
}

/// Provider interface for generating the next scene.
///
/// `generate` receives the full ordered transcript as context and blocks
/// until a scene is available or the request has failed. Implementations must
/// not mutate or reorder the context, must perform exactly one logical
/// request per call, and must hold no per-call state afterwards.
pub trait SceneProvider: Send + Sync + 'static {
    /// Returns provider/model identity metadata.
    fn profile(&self) -> ProviderProfile;

    /// Generates the next scene from `context`.
    fn generate(&self, context: &[Turn]) -> Result<String, GenerationError>;
}
