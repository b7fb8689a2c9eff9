//! Recording navigator.

use std::collections::VecDeque;
use std::sync::Mutex;

use zhimpa_core::navigation::Navigator;
use zhimpa_core::page::Page;

/// Number of past navigation targets kept.
pub const HISTORY_LIMIT: usize = 64;

/// Keeps the most recent navigation requests, plus the one not yet followed.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    state: Mutex<NavigationState>,
}

#[derive(Debug, Default)]
struct NavigationState {
    history: VecDeque<Page>,
    pending: Option<Page>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Up to [`HISTORY_LIMIT`] most recent targets, oldest first.
    pub fn history(&self) -> Vec<Page> {
        self.state
            .lock()
            .map(|state| state.history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The pending target, without taking it.
    pub fn pending(&self) -> Option<Page> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.pending.clone())
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, target: Page) {
        tracing::debug!("[Navigator] Navigating to {}", target);
        if let Ok(mut state) = self.state.lock() {
            if state.history.len() == HISTORY_LIMIT {
                state.history.pop_front();
            }
            state.history.push_back(target.clone());
            state.pending = Some(target);
        }
    }

    fn take_pending(&self) -> Option<Page> {
        self.state.lock().ok().and_then(|mut state| state.pending.take())
    }
}
