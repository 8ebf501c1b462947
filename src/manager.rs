use std::collections::HashMap;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;
use crate::core::domain::{Configuration, Identifiable, MAX_LOAN_PERIOD_DAYS};
use crate::core::events::{DomainEvent, DomainEventType};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{MemoryRepository, Repository};
use crate::gateway::callback::publisher::{CallbackPublisher, EventCallback};
use crate::gateway::events::EventPublisher;
use crate::loans::domain::model::LoanEntity;
use crate::reservations::domain::model::ReservationEntity;
use crate::resources::domain::model::ResourceEntity;
use crate::users::domain::model::UserEntity;
use crate::utils::clock::{Clock, SystemClock};

pub mod catalog;
pub mod checkout;
pub mod factory;
pub mod hold;
pub mod maintenance;
pub mod patrons;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;

// LibraryManager owns every resource, user, loan and reservation and enforces the
// lending rules between them. Loans and reservations refer to users and resources by id.
pub struct LibraryManager {
    config: Configuration,
    clock: Box<dyn Clock>,
    resources: MemoryRepository<ResourceEntity>,
    users: MemoryRepository<UserEntity>,
    active_loans: MemoryRepository<LoanEntity>,
    loan_history: MemoryRepository<LoanEntity>,
    active_reservations: MemoryRepository<ReservationEntity>,
    reservation_history: MemoryRepository<ReservationEntity>,
    publishers: Vec<Box<dyn EventPublisher>>,
}

impl LibraryManager {
    pub fn new(config: Configuration) -> Self {
        LibraryManager::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: Configuration, clock: Box<dyn Clock>) -> Self {
        LibraryManager {
            config,
            clock,
            resources: MemoryRepository::new("resource"),
            users: MemoryRepository::new("user"),
            active_loans: MemoryRepository::new("loan"),
            loan_history: MemoryRepository::new("loan history"),
            active_reservations: MemoryRepository::new("reservation"),
            reservation_history: MemoryRepository::new("reservation history"),
            publishers: vec![],
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn subscribe(&mut self, publisher: Box<dyn EventPublisher>) {
        self.publishers.push(publisher);
    }

    pub fn on_event(&mut self, callback: EventCallback) {
        self.subscribe(Box::new(CallbackPublisher::new(callback)));
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn set_configuration(&mut self, config: Configuration) {
        self.config = config;
    }

    pub fn library_name(&self) -> &str {
        &self.config.library_name
    }

    pub fn set_library_name(&mut self, library_name: &str) {
        self.config.library_name = library_name.to_string();
    }

    pub fn operating_hours(&self) -> &str {
        &self.config.operating_hours
    }

    pub fn set_operating_hours(&mut self, operating_hours: &str) {
        self.config.operating_hours = operating_hours.to_string();
    }

    pub fn default_loan_period(&self) -> i64 {
        self.config.default_loan_period_days
    }

    pub fn set_default_loan_period(&mut self, days: i64) -> LibraryResult<()> {
        if !(1..=MAX_LOAN_PERIOD_DAYS).contains(&days) {
            return Err(LibraryError::validation(
                format!("loan period must be between 1 and {} days", MAX_LOAN_PERIOD_DAYS).as_str(),
                Some("defaultLoanPeriod".to_string())));
        }
        self.config.default_loan_period_days = days;
        Ok(())
    }

    pub fn upcoming_events(&self) -> &[String] {
        &self.config.upcoming_events
    }

    pub fn add_upcoming_event(&mut self, event: &str) -> bool {
        self.config.add_upcoming_event(event)
    }

    pub fn remove_upcoming_event(&mut self, event: &str) -> bool {
        self.config.remove_upcoming_event(event)
    }

    pub fn generate_resource_id(prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4())
    }

    pub fn generate_user_id(prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4())
    }

    pub fn is_valid_resource_id(&self, resource_id: &str) -> bool {
        self.resources.get(resource_id).is_some()
    }

    pub fn is_valid_user_id(&self, user_id: &str) -> bool {
        self.users.get(user_id).is_some()
    }

    pub fn is_valid_loan_id(&self, loan_id: &str) -> bool {
        self.active_loans.get(loan_id).is_some()
    }

    pub fn is_resource_available(&self, resource_id: &str) -> bool {
        self.resources.get(resource_id).map(|r| r.is_available()).unwrap_or(false)
    }

    // The load_* and add_* hooks rebuild state from storage without notifications.
    pub fn load_resource(&mut self, resource: ResourceEntity) -> LibraryResult<()> {
        self.resources.create(resource)
    }

    pub fn load_user(&mut self, user: UserEntity) -> LibraryResult<()> {
        if self.email_taken(user.email(), None) {
            return Err(LibraryError::duplicate_key(format!("email {} is already registered", user.email()).as_str()));
        }
        self.users.create(user)
    }

    pub fn add_active_loan(&mut self, loan: LoanEntity) -> LibraryResult<()> {
        if !loan.is_active() {
            return Err(LibraryError::validation(
                format!("loan {} is {} and cannot be active", loan.id(), loan.status()).as_str(), None));
        }
        self.active_loans.create(loan)
    }

    pub fn add_loan_history(&mut self, loan: LoanEntity) -> LibraryResult<()> {
        self.loan_history.create(loan)
    }

    pub fn add_active_reservation(&mut self, reservation: ReservationEntity) -> LibraryResult<()> {
        if !reservation.is_active() {
            return Err(LibraryError::validation(
                format!("reservation {} is {} and cannot be active", reservation.id(), reservation.status()).as_str(), None));
        }
        self.active_reservations.create(reservation)
    }

    pub fn add_reservation_history(&mut self, reservation: ReservationEntity) -> LibraryResult<()> {
        self.reservation_history.create(reservation)
    }

    pub fn clear(&mut self) {
        self.resources.clear();
        self.users.clear();
        self.active_loans.clear();
        self.loan_history.clear();
        self.active_reservations.clear();
        self.reservation_history.clear();
    }

    pub(crate) fn current_loan_count(&self, user_id: &str) -> usize {
        self.active_loans.query(&|l: &LoanEntity| l.user_id() == user_id).len()
    }

    pub(crate) fn email_taken(&self, email: &str, except_user_id: Option<&str>) -> bool {
        let email = email.to_lowercase();
        self.users.query(&|u: &UserEntity| {
            u.email().to_lowercase() == email && Some(u.id().as_str()) != except_user_id
        }).len() > 0
    }

    // Publishing never rolls back the state change that triggered it.
    pub(crate) fn publish<T: Serialize>(&self, kind: DomainEventType, key: &str,
                                        metadata: HashMap<String, String>, data: &T) {
        if self.publishers.is_empty() {
            return;
        }
        match DomainEvent::build(kind, key, &metadata, data, self.now()) {
            Ok(event) => {
                for publisher in &self.publishers {
                    if let Err(err) = publisher.publish(&event) {
                        warn!(event = event.name.as_str(), key, error = %err, "failed to publish event");
                    }
                }
                debug!(event = event.name.as_str(), key, "published event");
            }
            Err(err) => {
                warn!(event = %kind, key, error = %err, "failed to build event");
            }
        }
    }
}

impl Default for LibraryManager {
    fn default() -> Self {
        LibraryManager::new(Configuration::default())
    }
}

pub(crate) fn event_metadata(user_id: &str, resource_id: &str) -> HashMap<String, String> {
    HashMap::from([
        ("user_id".to_string(), user_id.to_string()),
        ("resource_id".to_string(), resource_id.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use crate::core::domain::Configuration;
    use crate::core::events::DomainEvent;
    use crate::core::library::LibraryError;
    use crate::manager::fixtures::{book, setup, student};
    use crate::manager::LibraryManager;
    use crate::resources::domain::CatalogService;

    #[test]
    fn test_should_expose_configuration() {
        let (mut manager, _, _) = setup();
        assert_eq!("ENSIARY Library Management System", manager.library_name());
        assert_eq!(14, manager.default_loan_period());
        manager.set_library_name("Central Library");
        manager.set_operating_hours("24/7");
        assert!(manager.set_default_loan_period(0).is_err());
        assert!(manager.set_default_loan_period(i64::MAX / 1000).is_err());
        assert!(manager.set_default_loan_period(366).is_err());
        assert_eq!(14, manager.default_loan_period());
        manager.set_default_loan_period(21).expect("should set loan period");
        assert!(manager.add_upcoming_event("Research Workshop"));
        assert!(!manager.add_upcoming_event("Research Workshop"));
        assert_eq!(1, manager.upcoming_events().len());
        assert!(manager.remove_upcoming_event("Research Workshop"));
        assert_eq!("Central Library", manager.configuration().library_name.as_str());
        assert_eq!("24/7", manager.operating_hours());
        assert_eq!(21, manager.default_loan_period());
        manager.set_configuration(Configuration::new("Branch"));
        assert_eq!("Branch", manager.library_name());
    }

    #[test]
    fn test_should_generate_prefixed_ids() {
        let id = LibraryManager::generate_resource_id("BOOK");
        assert!(id.starts_with("BOOK_"));
        assert_ne!(id, LibraryManager::generate_resource_id("BOOK"));
        assert!(LibraryManager::generate_user_id("STU").starts_with("STU_"));
    }

    #[test]
    fn test_should_validate_ids() {
        let (mut manager, clock, _) = setup();
        manager.add_resource(book("B1", &clock)).expect("should add resource");
        assert!(manager.is_valid_resource_id("B1"));
        assert!(!manager.is_valid_resource_id("B2"));
        assert!(manager.is_resource_available("B1"));
        assert!(!manager.is_resource_available("B2"));
        assert!(!manager.is_valid_user_id("U1"));
        assert!(!manager.is_valid_loan_id("LOAN_1"));
    }

    #[test]
    fn test_should_reject_duplicate_email_on_load() {
        let (mut manager, clock, _) = setup();
        manager.load_user(student("U1", "a@ensia.edu.dz", &clock)).expect("should load user");
        let err = manager.load_user(student("U2", "A@ensia.edu.dz", &clock)).expect_err("should reject email");
        assert!(matches!(err, LibraryError::DuplicateKey { .. }));
        manager.clear();
        assert!(!manager.is_valid_user_id("U1"));
    }

    #[test]
    fn test_should_deliver_events_to_callbacks() {
        let (mut manager, clock, _) = setup();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(vec![]));
        let sink = seen.clone();
        manager.on_event(Box::new(move |event: &DomainEvent| {
            sink.lock().expect("should lock").push(event.name.clone());
        }));
        manager.add_resource(book("B1", &clock)).expect("should add resource");
        assert_eq!(vec!["resource_added".to_string()], *seen.lock().expect("should lock"));
    }
}
