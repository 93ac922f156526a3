//! In-memory domain event log.
//!
//! Stands in for a message broker: events are appended to a process-local
//! list that tests and the `/test/events` route can inspect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// A single published event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

/// Append-only event publisher with an on/off switch.
///
/// Cloning is cheap and every clone shares the same log.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    events: Arc<Mutex<Vec<Event>>>,
    enabled: Arc<AtomicBool>,
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    fn log(&self) -> MutexGuard<'_, Vec<Event>> {
        // A panic while holding the lock cannot leave a half-pushed Vec behind.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an event. Returns `false` when publishing is disabled.
    pub fn publish(&self, event_type: &str, user_id: &str, data: serde_json::Value) -> bool {
        if !self.is_enabled() {
            tracing::debug!(event_type, user_id, "Event publishing disabled, dropping event");
            return false;
        }

        self.log().push(Event {
            event_type: event_type.to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            data,
        });

        tracing::debug!(event_type, user_id, "Event published");
        true
    }

    /// Copy of every recorded event, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.log().clone()
    }

    pub fn clear(&self) {
        self.log().clear();
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    /// Simulates a broker outage. Already recorded events are kept.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_publish_appends_in_order() {
        let publisher = EventPublisher::new();

        assert!(publisher.publish("user.created", "1", json!({"username": "andy"})));
        assert!(publisher.publish("user.updated", "1", json!({})));

        let events = publisher.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "user.created");
        assert_eq!(events[0].data["username"], "andy");
        assert_eq!(events[1].event_type, "user.updated");
        assert!(events[0].timestamp <= events[1].timestamp);
    }

    #[test]
    fn test_disabled_publisher_drops_events_without_error() {
        let publisher = EventPublisher::new();
        publisher.publish("user.created", "1", json!({}));

        publisher.disable();
        assert!(!publisher.is_enabled());
        assert!(!publisher.publish("user.deleted", "1", json!({})));
        assert_eq!(publisher.events().len(), 1);

        publisher.enable();
        assert!(publisher.publish("user.deleted", "1", json!({})));
        assert_eq!(publisher.events().len(), 2);
    }

    #[test]
    fn test_events_returns_a_copy() {
        let publisher = EventPublisher::new();
        publisher.publish("user.created", "1", json!({}));

        let mut snapshot = publisher.events();
        snapshot.clear();

        assert_eq!(publisher.events().len(), 1);
    }

    #[test]
    fn test_clones_share_the_log() {
        let publisher = EventPublisher::new();
        let other = publisher.clone();

        other.publish("user.created", "7", json!({}));
        publisher.clear();

        assert!(other.events().is_empty());
    }
}
