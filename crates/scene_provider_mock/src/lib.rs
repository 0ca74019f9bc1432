//! Deterministic mock implementation of the shared `scene_provider` contract.
//!
//! This crate contains no transport/protocol logic and is intended for local
//! offline play and contract-level integration testing.

use std::sync::{Mutex, MutexGuard};

use scene_provider::{GenerationError, ProviderProfile, SceneProvider, Turn};

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

#[derive(Debug, Default)]
struct ReplayState {
    cursor: usize,
    observed_contexts: Vec<Vec<Turn>>,
}

/// Deterministic mock provider used by tests and offline local runs.
///
/// Scenes are replayed in order; once the script is exhausted the final
/// scene repeats, so a session can run indefinitely against it.
#[derive(Debug)]
pub struct MockSceneProvider {
    scenes: Vec<String>,
    failure: Option<GenerationError>,
    state: Mutex<ReplayState>,
}

impl MockSceneProvider {
    /// Creates a mock provider replaying caller-provided scenes.
    #[must_use]
    pub fn new(scenes: Vec<String>) -> Self {
        let scenes = if scenes.is_empty() {
            vec!["The dark says nothing back.".to_string()]
        } else {
            scenes
        };

        Self {
            scenes,
            failure: None,
            state: Mutex::new(ReplayState::default()),
        }
    }

    /// Creates a mock provider that fails every generation with `error`.
    #[must_use]
    pub fn failing(error: GenerationError) -> Self {
        Self {
            scenes: Vec::new(),
            failure: Some(error),
            state: Mutex::new(ReplayState::default()),
        }
    }

    /// Returns every context `generate` has been called with, in call order.
    #[must_use]
    pub fn observed_contexts(&self) -> Vec<Vec<Turn>> {
        lock_unpoisoned(&self.state).observed_contexts.clone()
    }

    /// Returns how many times `generate` has been called.
    #[must_use]
    pub fn calls(&self) -> usize {
        lock_unpoisoned(&self.state).observed_contexts.len()
    }
}

impl Default for MockSceneProvider {
    fn default() -> Self {
        Self::new(vec![
            "You wake on the floor of a house you do not remember entering. \
             A single candle gutters on the hallway table.\n\
             1. Take the candle.\n\
             2. Call out into the dark."
                .to_string(),
            "The candle throws your shadow long across peeling wallpaper. \
             Somewhere above you, a floorboard answers your weight with its own.\n\
             1. Climb the stairs.\n\
             2. Stay very still and listen."
                .to_string(),
            "The listening is a mistake. The house has been listening longer.\n\
             1. Run for the front door.\n\
             2. Ask the dark what it wants."
                .to_string(),
        ])
    }
}

impl SceneProvider for MockSceneProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            model_id: "scripted".to_string(),
        }
    }

    fn generate(&self, context: &[Turn]) -> Result<String, GenerationError> {
        let mut state = lock_unpoisoned(&self.state);
        state.observed_contexts.push(context.to_vec());

        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        let index = state.cursor.min(self.scenes.len() - 1);
        state.cursor += 1;
        Ok(self.scenes[index].clone())
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
