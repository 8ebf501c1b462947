use chrono::NaiveDateTime;
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, ReservationStatus};
use crate::utils::date::add_days;
use crate::utils::validation::is_blank;

pub const DEFAULT_EXPIRATION_DAYS: i64 = 7;

pub fn generate_reservation_id() -> String {
    format!("RES_{}", Uuid::new_v4())
}

// ReservationEntity abstracts a queued request for a resource that is lent out.
#[derive(Debug, PartialEq, Clone)]
pub struct ReservationEntity {
    pub(crate) reservation_id: String,
    pub(crate) user_id: String,
    pub(crate) resource_id: String,
    pub(crate) resource_title: String,
    pub(crate) reservation_date: NaiveDateTime,
    pub(crate) expiration_date: NaiveDateTime,
    pub(crate) status: ReservationStatus,
    pub(crate) notes: String,
}

impl ReservationEntity {
    pub fn new(user_id: &str, resource_id: &str, resource_title: &str,
               reservation_date: NaiveDateTime, expiration_days: i64) -> LibraryResult<Self> {
        if is_blank(user_id) || is_blank(resource_id) {
            return Err(LibraryError::validation("reservation requires user and resource ids",
                                                Some("reservation".to_string())));
        }
        if expiration_days <= 0 {
            return Err(LibraryError::validation("expiration days must be positive",
                                                Some("expirationDate".to_string())));
        }
        let expiration_date = add_days(reservation_date, expiration_days, "expirationDate")?;
        Ok(ReservationEntity {
            reservation_id: generate_reservation_id(),
            user_id: user_id.to_string(),
            resource_id: resource_id.to_string(),
            resource_title: resource_title.to_string(),
            reservation_date,
            expiration_date,
            status: ReservationStatus::Active,
            notes: String::new(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn resource_title(&self) -> &str {
        &self.resource_title
    }

    pub fn reservation_date(&self) -> NaiveDateTime {
        self.reservation_date
    }

    pub fn expiration_date(&self) -> NaiveDateTime {
        self.expiration_date
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.is_active() && now > self.expiration_date
    }

    pub fn can_be_fulfilled(&self, now: NaiveDateTime) -> bool {
        self.is_active() && !self.is_expired(now)
    }

    pub fn days_until_expiration(&self, now: NaiveDateTime) -> i64 {
        if !self.is_active() {
            return 0;
        }
        (self.expiration_date - now).num_days().max(0)
    }

    pub fn fulfill(&mut self, now: NaiveDateTime) -> LibraryResult<()> {
        if !self.can_be_fulfilled(now) {
            return Err(LibraryError::unavailable(
                format!("reservation {} cannot be fulfilled in status {}",
                        self.reservation_id, self.status).as_str(), None));
        }
        self.status = ReservationStatus::Fulfilled;
        Ok(())
    }

    pub fn cancel(&mut self) -> LibraryResult<()> {
        if self.status == ReservationStatus::Fulfilled {
            return Err(LibraryError::validation(
                format!("reservation {} is already fulfilled", self.reservation_id).as_str(), None));
        }
        self.status = ReservationStatus::Cancelled;
        Ok(())
    }

    pub fn expire(&mut self) {
        if self.is_active() {
            self.status = ReservationStatus::Expired;
        }
    }

    pub fn extend(&mut self, days: i64) -> LibraryResult<NaiveDateTime> {
        if !self.is_active() {
            return Err(LibraryError::validation(
                format!("only active reservations can be extended, {} is {}",
                        self.reservation_id, self.status).as_str(), None));
        }
        if days <= 0 {
            return Err(LibraryError::validation("extension days must be positive", Some("days".to_string())));
        }
        self.expiration_date = add_days(self.expiration_date, days, "days")?;
        Ok(self.expiration_date)
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }
}

impl Identifiable for ReservationEntity {
    fn id(&self) -> String {
        self.reservation_id.to_string()
    }
}
