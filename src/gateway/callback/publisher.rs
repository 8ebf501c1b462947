use std::fmt;
use std::fmt::{Debug, Formatter};
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

pub type EventCallback = Box<dyn Fn(&DomainEvent) + Sync + Send>;

// CallbackPublisher hands every notification to a registered closure, which is how a
// presentation layer observes the manager.
pub struct CallbackPublisher {
    callback: EventCallback,
}

impl CallbackPublisher {
    pub fn new(callback: EventCallback) -> Self {
        CallbackPublisher { callback }
    }
}

impl Debug for CallbackPublisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackPublisher")
    }
}

impl EventPublisher for CallbackPublisher {
    fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        (self.callback)(event);
        Ok(())
    }
}
