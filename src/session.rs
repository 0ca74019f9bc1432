//! The session controller: turn sequencing, input buffering, termination.

use scene_provider::{GenerationError, SceneProvider, Turn};

use crate::frame::InputEvent;
use crate::transcript::Transcript;

/// Reserved end-session keyword, matched case-insensitively against the
/// whole buffer instead of being submitted as a choice.
pub const EXIT_KEYWORD: &str = "exit";

/// Controller states. Termination is one-way; every other transition follows
/// the commit/generate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInitialScene,
    AwaitingInput,
    Generating,
    Terminated,
}

/// One interactive narrative session from initial scene to termination.
///
/// The generation call is blocking and synchronous: while a request is
/// outstanding the session sits in [`SessionState::Generating`] and observes
/// no input. That frozen-frame behavior is the contract, not an accident;
/// any background generation would have to redefine it.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    transcript: Transcript,
    current_scene: String,
    input_buffer: String,
    error_notice: Option<String>,
}

impl Session {
    /// Creates a session whose transcript is seeded with `directive`.
    #[must_use]
    pub fn new(directive: impl Into<String>) -> Self {
        Self {
            state: SessionState::AwaitingInitialScene,
            transcript: Transcript::new(directive),
            current_scene: String::new(),
            input_buffer: String::new(),
            error_notice: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// False exactly once the session has terminated.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state != SessionState::Terminated
    }

    /// The most recent generated scene; mirrors the newest scene turn.
    #[must_use]
    pub fn current_scene(&self) -> &str {
        &self.current_scene
    }

    /// The in-progress player input.
    #[must_use]
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The pending user-visible failure message, if the session terminated
    /// on a generation error. Taking it clears it, so it surfaces once.
    pub fn take_error_notice(&mut self) -> Option<String> {
        self.error_notice.take()
    }

    /// Generates the opening scene from the directive-only context.
    ///
    /// A failure here terminates the session the same way a mid-session
    /// failure does: visible notice, no retry.
    pub fn open(&mut self, provider: &dyn SceneProvider) {
        assert_eq!(
            self.state,
            SessionState::AwaitingInitialScene,
            "session opened twice"
        );

        self.state = SessionState::Generating;
        self.run_generation(provider);
    }

    /// Applies one input event.
    ///
    /// Close is honored in any state; everything else is evaluated only
    /// while awaiting input and ignored otherwise.
    pub fn handle_event(&mut self, event: InputEvent, provider: &dyn SceneProvider) {
        if matches!(event, InputEvent::Close) {
            self.state = SessionState::Terminated;
            return;
        }

        if self.state != SessionState::AwaitingInput {
            return;
        }

        match event {
            InputEvent::Printable(ch) => self.input_buffer.push(ch),
            InputEvent::Erase => {
                self.input_buffer.pop();
            }
            InputEvent::Commit => self.on_commit(provider),
            InputEvent::Close => unreachable!("close handled above"),
        }
    }

    fn on_commit(&mut self, provider: &dyn SceneProvider) {
        let choice = std::mem::take(&mut self.input_buffer);

        if choice.eq_ignore_ascii_case(EXIT_KEYWORD) {
            // End of session, not a choice: no provider call, no new turn.
            self.state = SessionState::Terminated;
            return;
        }

        self.state = SessionState::Generating;
        self.transcript.append(Turn::choice(choice));
        self.run_generation(provider);
    }

    /// Resolves the single pending request slot entered at `Generating`.
    fn run_generation(&mut self, provider: &dyn SceneProvider) {
        debug_assert_eq!(self.state, SessionState::Generating);

        match provider.generate(self.transcript.as_context()) {
            Ok(scene) => {
                self.transcript.append(Turn::scene(scene.clone()));
                self.current_scene = scene;
                self.state = SessionState::AwaitingInput;
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: GenerationError) {
        self.error_notice = Some(format!("The story could not continue: {error}"));
        self.state = SessionState::Terminated;
    }
}

#[cfg(test)]
mod tests {
    use scene_provider::{GenerationError, TurnKind};
    use scene_provider_mock::MockSceneProvider;

    use super::{Session, SessionState, EXIT_KEYWORD};
    use crate::frame::InputEvent;

    fn opened_session(provider: &MockSceneProvider) -> Session {
        let mut session = Session::new("narrate a haunting");
        session.open(provider);
        assert_eq!(session.state(), SessionState::AwaitingInput);
        session
    }

    fn type_text(session: &mut Session, provider: &MockSceneProvider, text: &str) {
        for ch in text.chars() {
            session.handle_event(InputEvent::Printable(ch), provider);
        }
    }

    #[test]
    fn open_generates_initial_scene_from_directive_only_context() {
        let provider = MockSceneProvider::new(vec!["The hallway waits.".to_string()]);
        let session = opened_session(&provider);

        assert_eq!(session.current_scene(), "The hallway waits.");
        assert_eq!(session.transcript().len(), 2);
        let observed = provider.observed_contexts();
        assert_eq!(observed[0].len(), 1);
        assert_eq!(observed[0][0].kind(), TurnKind::Directive);
    }

    #[test]
    fn printable_and_erase_edit_the_buffer() {
        let provider = MockSceneProvider::default();
        let mut session = opened_session(&provider);

        type_text(&mut session, &provider, "go north");
        assert_eq!(session.input_buffer(), "go north");

        session.handle_event(InputEvent::Erase, &provider);
        assert_eq!(session.input_buffer(), "go nort");
    }

    #[test]
    fn erase_on_empty_buffer_is_a_no_op() {
        let provider = MockSceneProvider::default();
        let mut session = opened_session(&provider);

        session.handle_event(InputEvent::Erase, &provider);
        assert_eq!(session.input_buffer(), "");
        assert_eq!(session.state(), SessionState::AwaitingInput);
    }

    #[test]
    fn commit_runs_a_turn_and_clears_the_buffer() {
        let provider = MockSceneProvider::new(vec![
            "The hallway waits.".to_string(),
            "You enter a corridor.".to_string(),
        ]);
        let mut session = opened_session(&provider);

        type_text(&mut session, &provider, "go north");
        session.handle_event(InputEvent::Commit, &provider);

        assert_eq!(session.state(), SessionState::AwaitingInput);
        assert_eq!(session.current_scene(), "You enter a corridor.");
        assert_eq!(session.input_buffer(), "");

        let context = session.transcript().as_context();
        assert_eq!(context.len(), 4);
        assert_eq!(context[2].kind(), TurnKind::Choice);
        assert_eq!(context[2].text(), "go north");
        assert_eq!(context[3].kind(), TurnKind::Scene);
        assert_eq!(context[3].text(), "You enter a corridor.");
    }

    #[test]
    fn exit_keyword_terminates_without_a_provider_call() {
        for keyword in [EXIT_KEYWORD, "EXIT", "Exit", "eXiT"] {
            let provider = MockSceneProvider::default();
            let mut session = opened_session(&provider);
            let turns_before = session.transcript().len();
            let calls_before = provider.calls();

            type_text(&mut session, &provider, keyword);
            session.handle_event(InputEvent::Commit, &provider);

            assert_eq!(session.state(), SessionState::Terminated);
            assert!(!session.is_running());
            assert_eq!(session.transcript().len(), turns_before);
            assert_eq!(provider.calls(), calls_before);
        }
    }

    #[test]
    fn generation_failure_terminates_with_one_notice_and_unchanged_scene() {
        let provider = MockSceneProvider::new(vec!["The hallway waits.".to_string()]);
        let mut session = opened_session(&provider);

        let failing =
            MockSceneProvider::failing(GenerationError::Transport("wire cut".to_string()));
        type_text(&mut session, &failing, "go north");
        session.handle_event(InputEvent::Commit, &failing);

        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(session.current_scene(), "The hallway waits.");

        let notice = session
            .take_error_notice()
            .expect("a failure notice should be pending");
        assert!(notice.contains("wire cut"));
        assert_eq!(session.take_error_notice(), None);
    }

    #[test]
    fn initial_generation_failure_terminates_the_session() {
        let provider =
            MockSceneProvider::failing(GenerationError::EmptyScene);
        let mut session = Session::new("narrate");
        session.open(&provider);

        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(session.current_scene(), "");
        assert!(session.take_error_notice().is_some());
    }

    #[test]
    fn close_terminates_from_any_state_without_generation() {
        let provider = MockSceneProvider::default();

        let mut fresh = Session::new("narrate");
        fresh.handle_event(InputEvent::Close, &provider);
        assert_eq!(fresh.state(), SessionState::Terminated);

        let mut mid_input = opened_session(&provider);
        type_text(&mut mid_input, &provider, "half a thou");
        let calls = provider.calls();
        mid_input.handle_event(InputEvent::Close, &provider);
        assert_eq!(mid_input.state(), SessionState::Terminated);
        assert_eq!(provider.calls(), calls);
    }

    #[test]
    fn input_is_ignored_after_termination() {
        let provider = MockSceneProvider::default();
        let mut session = opened_session(&provider);
        session.handle_event(InputEvent::Close, &provider);

        session.handle_event(InputEvent::Printable('x'), &provider);
        session.handle_event(InputEvent::Commit, &provider);

        assert_eq!(session.input_buffer(), "");
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn empty_commit_is_submitted_as_an_empty_choice() {
        let provider = MockSceneProvider::new(vec![
            "The hallway waits.".to_string(),
            "Silence answers.".to_string(),
        ]);
        let mut session = opened_session(&provider);

        session.handle_event(InputEvent::Commit, &provider);

        assert_eq!(session.state(), SessionState::AwaitingInput);
        let context = session.transcript().as_context();
        assert_eq!(context[2].kind(), TurnKind::Choice);
        assert_eq!(context[2].text(), "");
    }

    #[test]
    fn full_context_is_resent_on_every_turn() {
        let provider = MockSceneProvider::new(vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
        ]);
        let mut session = opened_session(&provider);

        type_text(&mut session, &provider, "a");
        session.handle_event(InputEvent::Commit, &provider);
        type_text(&mut session, &provider, "b");
        session.handle_event(InputEvent::Commit, &provider);

        let observed = provider.observed_contexts();
        assert_eq!(observed.len(), 3);
        assert_eq!(observed[0].len(), 1);
        assert_eq!(observed[1].len(), 3);
        assert_eq!(observed[2].len(), 5);
    }
}
