//! Seams between the session controller and its environment.
//!
//! The controller never talks to a concrete screen or keyboard; it consumes
//! these two narrow interfaces, implemented by the terminal adapter in
//! production and by spies in tests.

use std::io;

/// One keystroke-level event from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable character destined for the input buffer.
    Printable(char),
    /// Remove the last buffered character.
    Erase,
    /// Submit the buffer as a player choice or exit request.
    Commit,
    /// Environment close/quit; honored in any state.
    Close,
}

/// Renders one frame per loop iteration.
pub trait FrameSink {
    /// Columns available for wrapped scene text this frame.
    fn scene_width(&self) -> usize;

    /// Draws the full frame. The return value is only consulted for I/O
    /// failure; there is no partial redraw.
    fn draw_frame(
        &mut self,
        title: &str,
        scene_lines: &[String],
        prompt_label: &str,
        input: &str,
    ) -> io::Result<()>;
}

/// Produces input events.
///
/// Polled once per loop iteration and non-blocking: an empty poll yields an
/// empty vector, never waits.
pub trait InputSource {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
}
