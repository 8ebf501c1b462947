use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

// LogPublisher writes every notification to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogPublisher {}

impl LogPublisher {
    pub fn new() -> Self {
        LogPublisher {}
    }
}

impl EventPublisher for LogPublisher {
    fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        info!(event = event.name.as_str(), group = event.group.as_str(), key = event.key.as_str(),
            metadata = ?event.metadata, "library event");
        Ok(())
    }
}
