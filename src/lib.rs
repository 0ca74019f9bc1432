//! Dreadhall: a terminal horror text adventure driven by a generative
//! narrator.
//!
//! The session controller owns the transcript, the input buffer, and the
//! blocking request/response cycle with the scene provider. Rendering and
//! input are narrow seams ([`frame::FrameSink`], [`frame::InputSource`])
//! implemented by a crossterm terminal adapter in production and by spies in
//! tests.

pub mod config;
pub mod frame;
pub mod layout;
pub mod providers;
pub mod run;
pub mod session;
pub mod terminal;
pub mod transcript;

pub use config::{ConfigError, ProcessContext};
pub use frame::{FrameSink, InputEvent, InputSource};
pub use layout::{display_width, wrap_text};
pub use session::{Session, SessionState, EXIT_KEYWORD};
pub use transcript::Transcript;
