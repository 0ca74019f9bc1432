//! The per-frame session loop: wrap, draw, poll, handle.

use std::io;
use std::thread;
use std::time::Duration;

use scene_provider::SceneProvider;

use crate::frame::{FrameSink, InputSource};
use crate::layout::{display_width, wrap_text};
use crate::session::Session;

/// Title line drawn on every frame.
pub const TITLE: &str = "🌌 Dreadhall 🌌";

/// Label in front of the player's input buffer.
pub const PROMPT_LABEL: &str = "Your choice: ";

/// Sleep between empty polls; bounds idle CPU without adding latency a
/// player would notice.
const IDLE_POLL: Duration = Duration::from_millis(16);

/// Drives `session` against `surface` until it terminates.
///
/// One render-then-handle-events cycle per iteration. The generation call
/// inside event handling blocks the frame; input arriving meanwhile is
/// simply observed on the next poll after the call returns.
pub fn run_session<S>(
    session: &mut Session,
    provider: &dyn SceneProvider,
    surface: &mut S,
) -> io::Result<()>
where
    S: FrameSink + InputSource + ?Sized,
{
    session.open(provider);

    while session.is_running() {
        let width = surface.scene_width();
        let lines = wrap_text(session.current_scene(), width, display_width);
        surface.draw_frame(TITLE, &lines, PROMPT_LABEL, session.input_buffer())?;

        let events = surface.poll_events()?;
        if events.is_empty() {
            thread::sleep(IDLE_POLL);
            continue;
        }

        for event in events {
            session.handle_event(event, provider);
            if !session.is_running() {
                break;
            }
        }
    }

    Ok(())
}
