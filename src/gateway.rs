use crate::gateway::memory::publisher::MemoryPublisher;

pub mod callback;
pub mod events;
pub mod factory;
pub mod logs;
pub mod memory;

#[derive(Debug)]
pub enum GatewayPublisherVia {
    Logs,
    Memory(MemoryPublisher),
}
