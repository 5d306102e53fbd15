//! services/app/src/stores/notifications.rs
//!
//! Holds the single most recent suggestion event. The widget that renders
//! suggestion text polls this slot and clears it once handled; the entity
//! stores only write it through the `SuggestionSink` port.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use daykeep_core::events::SuggestionEvent;
use daykeep_core::ports::SuggestionSink;
use tracing::debug;

/// A suggestion event plus the moment it was raised.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub event: SuggestionEvent,
    pub raised_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct NotificationStore {
    last_event: RwLock<Option<RecordedEvent>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_event(&self) -> Option<RecordedEvent> {
        self.last_event.read().expect("event slot poisoned").clone()
    }

    pub fn clear_last_event(&self) {
        *self.last_event.write().expect("event slot poisoned") = None;
    }
}

impl SuggestionSink for NotificationStore {
    fn notify(&self, event: SuggestionEvent) {
        debug!(?event, "suggestion event raised");
        *self.last_event.write().expect("event slot poisoned") = Some(RecordedEvent {
            event,
            raised_at: Utc::now(),
        });
    }
}
