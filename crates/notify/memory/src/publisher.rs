use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use bliss_core::LifecycleEvent;
use bliss_notify::error::NotifyError;
use bliss_notify::publisher::EventPublisher;

/// Capturing [`EventPublisher`] that stores every published event and
/// hands out sequential message ids. Can be switched into a failing mode
/// to exercise the best-effort notification path.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    events: Mutex<Vec<LifecycleEvent>>,
    next_message_id: AtomicU64,
    failing: AtomicBool,
}

impl MemoryPublisher {
    /// Create a publisher that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent publish fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of every event published so far.
    pub fn published(&self) -> Vec<LifecycleEvent> {
        self.events.lock().expect("publisher lock poisoned").clone()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &LifecycleEvent) -> Result<String, NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Publish("memory publisher set to fail".into()));
        }

        self.events
            .lock()
            .expect("publisher lock poisoned")
            .push(event.clone());
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("memory-{id}"))
    }
}
