use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;
use crate::manager::LibraryManager;

pub fn create_library_manager(config: &Configuration, via: GatewayPublisherVia) -> LibraryManager {
    let mut manager = LibraryManager::new(config.clone());
    manager.subscribe(create_publisher(via));
    manager
}
