use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;

// EventPublisher delivers library notifications to an observer.
pub trait EventPublisher: Sync + Send {
    fn publish(&self, event: &DomainEvent) -> LibraryResult<()>;
}
