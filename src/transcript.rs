//! The ordered, append-only turn log sent as context on every generation.

use scene_provider::{Turn, TurnKind};

/// Full conversation history for one session.
///
/// The first turn is always the directive; thereafter scenes and choices
/// alternate, starting with a scene. The whole transcript is resent to the
/// generator on every request; there is no summarization, truncation, or
/// windowing, so growth is unbounded for the session lifetime. That is a
/// known scaling limit, accepted for simplicity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Creates a transcript seeded with its mandatory leading directive.
    #[must_use]
    pub fn new(directive: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::directive(directive)],
        }
    }

    /// Returns the kind the alternation invariant expects next.
    #[must_use]
    pub fn expected_next(&self) -> TurnKind {
        match self.turns.last().map(Turn::kind) {
            Some(TurnKind::Directive) | Some(TurnKind::Choice) => TurnKind::Scene,
            Some(TurnKind::Scene) => TurnKind::Choice,
            None => unreachable!("transcript is seeded with a directive"),
        }
    }

    /// Appends a turn.
    ///
    /// Panics when `turn` breaks the directive, scene, (choice, scene)*
    /// alternation. A violation can only come from a controller bug, so it is
    /// a programming error rather than a recoverable condition.
    pub fn append(&mut self, turn: Turn) {
        let expected = self.expected_next();
        assert_eq!(
            turn.kind(),
            expected,
            "transcript alternation broken: appended {} where {} was expected",
            turn.kind(),
            expected
        );
        self.turns.push(turn);
    }

    /// Returns the full ordered history, the literal context window for the
    /// next generation request.
    #[must_use]
    pub fn as_context(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; a transcript carries at least its directive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
