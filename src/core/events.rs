use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// DomainEventType defines the notifications raised by the library manager
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum DomainEventType {
    ResourceAdded,
    ResourceRemoved,
    UserAdded,
    UserRemoved,
    ResourceBorrowed,
    ResourceReturned,
    LoanRenewed,
    ItemOverdue,
    ResourceReserved,
    ReservationCancelled,
    ReservationExpired,
    ReservedResourceAvailable,
}

impl DomainEventType {
    pub fn group(&self) -> &'static str {
        match self {
            DomainEventType::ResourceAdded | DomainEventType::ResourceRemoved => "resources",
            DomainEventType::UserAdded | DomainEventType::UserRemoved => "users",
            DomainEventType::ResourceBorrowed | DomainEventType::ResourceReturned |
            DomainEventType::LoanRenewed | DomainEventType::ItemOverdue => "loans",
            DomainEventType::ResourceReserved | DomainEventType::ReservationCancelled |
            DomainEventType::ReservationExpired | DomainEventType::ReservedResourceAvailable => "reservations",
        }
    }
}

impl Display for DomainEventType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DomainEventType::ResourceAdded => write!(f, "resource_added"),
            DomainEventType::ResourceRemoved => write!(f, "resource_removed"),
            DomainEventType::UserAdded => write!(f, "user_added"),
            DomainEventType::UserRemoved => write!(f, "user_removed"),
            DomainEventType::ResourceBorrowed => write!(f, "resource_borrowed"),
            DomainEventType::ResourceReturned => write!(f, "resource_returned"),
            DomainEventType::LoanRenewed => write!(f, "loan_renewed"),
            DomainEventType::ItemOverdue => write!(f, "item_overdue"),
            DomainEventType::ResourceReserved => write!(f, "resource_reserved"),
            DomainEventType::ReservationCancelled => write!(f, "reservation_cancelled"),
            DomainEventType::ReservationExpired => write!(f, "reservation_expired"),
            DomainEventType::ReservedResourceAvailable => write!(f, "reserved_resource_available"),
        }
    }
}

// DomainEvent abstracts a notification about a library state change
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub group: String,
    pub key: String,
    pub kind: DomainEventType,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn build<T: Serialize>(kind: DomainEventType, key: &str, metadata: &HashMap<String, String>,
                               data: &T, created_at: NaiveDateTime) -> serde_json::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: kind.to_string(),
            group: kind.group().to_string(),
            key: key.to_string(),
            kind,
            metadata: metadata.clone(),
            json_data: json,
            created_at,
        })
    }

    pub fn metadata_value(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).map(String::as_str)
    }
}
