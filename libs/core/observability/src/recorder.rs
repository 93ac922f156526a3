use crate::{EventPublisher, MetricsCollector};

/// Event log and counters bundled for services that report both.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub events: EventPublisher,
    pub metrics: MetricsCollector,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump `counter` and publish `event_type`.
    ///
    /// The counter is incremented even when publishing is disabled. Returns
    /// whether the event was accepted.
    pub fn record(
        &self,
        event_type: &str,
        counter: &str,
        user_id: &str,
        data: serde_json::Value,
    ) -> bool {
        self.metrics.increment(counter);
        let published = self.events.publish(event_type, user_id, data);
        if !published {
            tracing::warn!(event_type, user_id, "Event was not published");
        }
        published
    }
}
