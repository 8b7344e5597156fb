//! Sequential dispatch loop around [`reduce`].

use tracing::debug;

use crate::{action::Action, reducer::reduce, state::AppState};

/// Owns the current [`AppState`] and replaces it on every dispatch.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    dispatched: usize,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            state: initial_state,
            dispatched: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of actions applied since the store was created.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(kind = action.kind(), seq = self.dispatched, "dispatching action");
        let failed = action.is_failure();

        let current = std::mem::take(&mut self.state);
        self.state = reduce(Some(current), action);
        self.dispatched += 1;

        if failed {
            if let Some(error) = &self.state.error {
                debug!(%error, "operation failed");
            }
        }
    }

    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    pub fn into_state(self) -> AppState {
        self.state
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
