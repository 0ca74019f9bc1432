//! Transport-only chat-completions client primitives.
//!
//! This crate owns request/response building and parsing for the narrative
//! generation endpoint only. It intentionally contains no credential
//! discovery and no session or rendering coupling.
//!
//! One logical request maps to one HTTP call: there is no retry loop and no
//! streaming. A failed request surfaces as an [`OpenAiApiError`] for the
//! caller to translate.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::OpenAiApiClient;
pub use config::OpenAiApiConfig;
pub use error::OpenAiApiError;
pub use payload::{ChatMessage, ChatRequest};
pub use url::normalize_chat_url;
