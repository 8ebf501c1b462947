use std::sync::{Arc, Mutex};
use crate::core::events::{DomainEvent, DomainEventType};
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

// MemoryPublisher records notifications; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryPublisher {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        MemoryPublisher::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn events_of(&self, kind: DomainEventType) -> Vec<DomainEvent> {
        self.events().into_iter().filter(|e| e.kind == kind).collect()
    }

    pub fn count(&self, kind: DomainEventType) -> usize {
        self.events_of(kind).len()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl EventPublisher for MemoryPublisher {
    fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        let mut events = self.events.lock()
            .map_err(|err| LibraryError::runtime(format!("event log poisoned {}", err).as_str(), None))?;
        events.push(event.clone());
        Ok(())
    }
}
