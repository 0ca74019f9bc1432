//! Crossterm-backed implementation of the frame and input seams.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::frame::{FrameSink, InputEvent, InputSource};

/// Columns kept free on each side of the scene block.
const MARGIN_COLUMNS: u16 = 2;
/// Row where the scene block starts; row 0 is the title.
const SCENE_ROW: u16 = 2;
/// Narrowest scene width still rendered when the window gets tiny.
const MIN_SCENE_WIDTH: usize = 16;

const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Raw-mode alternate-screen terminal for one session.
///
/// Construction claims the terminal; `Drop` restores it unconditionally so a
/// failed session never strands the shell in raw mode.
pub struct SessionTerminal {
    stdout: Stdout,
}

impl SessionTerminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        Ok(Self { stdout })
    }

    fn dimensions(&self) -> (u16, u16) {
        size().unwrap_or(FALLBACK_SIZE)
    }
}

impl FrameSink for SessionTerminal {
    fn scene_width(&self) -> usize {
        let (columns, _) = self.dimensions();
        (columns.saturating_sub(MARGIN_COLUMNS * 2) as usize).max(MIN_SCENE_WIDTH)
    }

    fn draw_frame(
        &mut self,
        title: &str,
        scene_lines: &[String],
        prompt_label: &str,
        input: &str,
    ) -> io::Result<()> {
        let (_, rows) = self.dimensions();

        queue!(
            self.stdout,
            Clear(ClearType::All),
            MoveTo(MARGIN_COLUMNS, 0),
            Print(title)
        )?;

        let mut row = SCENE_ROW;
        for line in scene_lines {
            if row >= rows.saturating_sub(2) {
                break;
            }
            queue!(self.stdout, MoveTo(MARGIN_COLUMNS, row), Print(line))?;
            row += 1;
        }

        // Prompt sits on the second-to-last row; the cursor lands after the
        // buffered input so typing reads naturally.
        let prompt_row = rows.saturating_sub(2);
        queue!(
            self.stdout,
            MoveTo(MARGIN_COLUMNS, prompt_row),
            Print(prompt_label),
            Print(input)
        )?;

        self.stdout.flush()
    }
}

impl InputSource for SessionTerminal {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if let Some(mapped) = map_key(key) {
                    events.push(mapped);
                }
            }
        }

        Ok(events)
    }
}

impl Drop for SessionTerminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(InputEvent::Close),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(InputEvent::Commit),
        KeyCode::Backspace => Some(InputEvent::Erase),
        KeyCode::Esc => Some(InputEvent::Close),
        KeyCode::Char(ch) => Some(InputEvent::Printable(ch)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::map_key;
    use crate::frame::InputEvent;

    #[test]
    fn printable_keys_map_to_printable_events() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE)),
            Some(InputEvent::Printable('g'))
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(InputEvent::Printable('G'))
        );
    }

    #[test]
    fn editing_and_commit_keys_map_to_their_events() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(InputEvent::Erase)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(InputEvent::Commit)
        );
    }

    #[test]
    fn close_arrives_as_escape_or_control_chords() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(InputEvent::Close)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Close)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(InputEvent::Close)
        );
    }

    #[test]
    fn unmapped_keys_yield_nothing() {
        assert_eq!(map_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)), None);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }
}
