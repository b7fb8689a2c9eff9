//! Queueing notifier.

use std::collections::VecDeque;
use std::sync::Mutex;

use zhimpa_core::notice::{Notice, Notifier};

/// Holds notices until the front end drains and shows them.
#[derive(Debug, Default)]
pub struct QueueNotifier {
    queue: Mutex<VecDeque<Notice>>,
}

impl QueueNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.queue
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Notifier for QueueNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!("[Notifier] {:?}: {}", notice.level, notice.message);
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(notice);
        }
    }
}
