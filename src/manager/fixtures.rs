use chrono::{NaiveDate, NaiveDateTime};
use crate::core::library::UserType;
use crate::gateway::memory::publisher::MemoryPublisher;
use crate::manager::LibraryManager;
use crate::core::domain::Configuration;
use crate::resources::domain::book::BookDetails;
use crate::resources::domain::model::{ResourceDetails, ResourceEntity};
use crate::users::domain::model::UserEntity;
use crate::utils::clock::{Clock, ManualClock};

pub(crate) fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1).and_then(|d| d.and_hms_opt(9, 0, 0)).expect("should build date")
}

pub(crate) fn setup() -> (LibraryManager, ManualClock, MemoryPublisher) {
    let clock = ManualClock::new(start());
    let publisher = MemoryPublisher::new();
    let mut manager = LibraryManager::with_clock(Configuration::default(), Box::new(clock.clone()));
    manager.subscribe(Box::new(publisher.clone()));
    (manager, clock, publisher)
}

pub(crate) fn book(id: &str, clock: &ManualClock) -> ResourceEntity {
    let details = BookDetails::new("978-0-13-110362-7", "Prentice Hall").expect("should build book");
    ResourceEntity::new(id, format!("Book {}", id).as_str(), "Kernighan", 1988,
                        ResourceDetails::Book(details), clock.now()).expect("should build resource")
}

pub(crate) fn student(id: &str, email: &str, clock: &ManualClock) -> UserEntity {
    user_of(id, email, UserType::Student, clock)
}

pub(crate) fn user_of(id: &str, email: &str, user_type: UserType, clock: &ManualClock) -> UserEntity {
    UserEntity::new(id, "Amina", "Haddad", email, user_type, clock.now()).expect("should build user")
}
