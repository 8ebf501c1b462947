use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use crate::core::domain::Identifiable;
use crate::core::events::DomainEventType;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::loans::domain::CheckoutService;
use crate::manager::{event_metadata, LibraryManager};
use crate::reservations::domain::HoldService;
use crate::reservations::domain::model::ReservationEntity;
use crate::reservations::dto::ReservationDto;

impl LibraryManager {
    fn archive_reservation(&mut self, reservation: ReservationEntity) {
        let reservation_id = reservation.id();
        self.active_reservations.delete(&reservation_id);
        if let Err(err) = self.reservation_history.create(reservation) {
            warn!(reservation_id = reservation_id.as_str(), error = %err, "failed to archive reservation");
        }
    }
}

impl HoldService for LibraryManager {
    fn reserve_resource(&mut self, user_id: &str, resource_id: &str) -> LibraryResult<String> {
        let now = self.now();
        let current = self.current_loan_count(user_id);
        let user = self.users.get(user_id)
            .ok_or_else(|| LibraryError::not_found(format!("user {} not found", user_id).as_str()))?;
        if !user.can_borrow(current) {
            return Err(LibraryError::not_granted(
                format!("user {} ({}) cannot reserve with {} of {} items on loan",
                        user_id, user.status(), current, user.max_borrow_limit()).as_str(),
                Some("borrowLimit".to_string())));
        }
        let resource = self.resources.get(resource_id)
            .ok_or_else(|| LibraryError::not_found(format!("resource {} not found", resource_id).as_str()))?;
        if resource.is_available() {
            return Err(LibraryError::unavailable(
                format!("resource {} is available and can be borrowed directly", resource_id).as_str(),
                Some("Available".to_string())));
        }
        let pending = self.active_reservations.query(&|r: &ReservationEntity| {
            r.user_id() == user_id && r.resource_id() == resource_id
        });
        if !pending.is_empty() {
            return Err(LibraryError::unavailable(
                format!("user {} already holds a reservation for {}", user_id, resource_id).as_str(),
                Some("Reserved".to_string())));
        }
        let reservation = ReservationEntity::new(user_id, resource_id, resource.title(), now,
                                                 self.config.reservation_expiration_days)?;
        let reservation_id = reservation.id();
        let dto = ReservationDto::from(&reservation);
        self.active_reservations.create(reservation)?;

        info!(reservation_id = reservation_id.as_str(), user_id, resource_id,
            expires = %dto.expiration_date, "reserved resource");
        self.publish(DomainEventType::ResourceReserved, &reservation_id,
                     event_metadata(user_id, resource_id), &dto);
        Ok(reservation_id)
    }

    fn cancel_reservation(&mut self, reservation_id: &str) -> bool {
        let mut reservation = match self.active_reservations.get(reservation_id) {
            Some(reservation) => reservation.clone(),
            None => {
                debug!(reservation_id, "no active reservation to cancel");
                return false;
            }
        };
        if let Err(err) = reservation.cancel() {
            warn!(reservation_id, error = %err, "failed to cancel reservation");
            return false;
        }
        let metadata = event_metadata(reservation.user_id(), reservation.resource_id());
        let dto = ReservationDto::from(&reservation);
        self.archive_reservation(reservation);

        info!(reservation_id, "cancelled reservation");
        self.publish(DomainEventType::ReservationCancelled, reservation_id, metadata, &dto);
        true
    }

    fn cancel_user_reservation(&mut self, user_id: &str, resource_id: &str) -> bool {
        let found = self.active_reservations
            .query(&|r: &ReservationEntity| r.user_id() == user_id && r.resource_id() == resource_id)
            .first()
            .map(|r| r.id());
        match found {
            Some(reservation_id) => self.cancel_reservation(&reservation_id),
            None => false,
        }
    }

    fn fulfill_reservation(&mut self, reservation_id: &str) -> LibraryResult<String> {
        let now = self.now();
        let reservation = self.active_reservations.get(reservation_id)
            .ok_or_else(|| LibraryError::not_found(format!("reservation {} not found", reservation_id).as_str()))?;
        if !reservation.can_be_fulfilled(now) {
            return Err(LibraryError::unavailable(
                format!("reservation {} expired on {}", reservation_id, reservation.expiration_date()).as_str(),
                Some("Expired".to_string())));
        }
        let user_id = reservation.user_id().to_string();
        let resource_id = reservation.resource_id().to_string();
        // the loan closes the reservation
        self.borrow_resource(&user_id, &resource_id)
    }

    fn extend_reservation(&mut self, reservation_id: &str, days: i64) -> LibraryResult<NaiveDateTime> {
        let reservation = self.active_reservations.get_mut(reservation_id)
            .ok_or_else(|| LibraryError::not_found(format!("reservation {} not found", reservation_id).as_str()))?;
        let expires = reservation.extend(days)?;
        info!(reservation_id, expires = %expires, "extended reservation");
        Ok(expires)
    }

    fn process_expired_reservations(&mut self) -> bool {
        let now = self.now();
        let expired: Vec<ReservationEntity> = self.active_reservations
            .query(&|r: &ReservationEntity| r.is_expired(now))
            .into_iter().cloned().collect();
        let changed = !expired.is_empty();
        for mut reservation in expired {
            reservation.expire();
            let reservation_id = reservation.id();
            let metadata = event_metadata(reservation.user_id(), reservation.resource_id());
            let dto = ReservationDto::from(&reservation);
            self.archive_reservation(reservation);
            info!(reservation_id = reservation_id.as_str(), "reservation expired");
            self.publish(DomainEventType::ReservationExpired, &reservation_id, metadata, &dto);
        }
        changed
    }

    fn notify_when_resource_available(&self, resource_id: &str) -> Option<String> {
        let now = self.now();
        let queue = self.resource_reservations(resource_id);
        let head = queue.first()?;
        if !head.can_be_fulfilled(now) {
            debug!(resource_id, reservation_id = head.id().as_str(), "head reservation cannot be fulfilled");
            return None;
        }
        info!(resource_id, reservation_id = head.id().as_str(), user_id = head.user_id(),
            "reserved resource is available");
        self.publish(DomainEventType::ReservedResourceAvailable, &head.id(),
                     event_metadata(head.user_id(), resource_id), &ReservationDto::from(*head));
        Some(head.id())
    }

    fn find_reservation_by_id(&self, reservation_id: &str) -> Option<&ReservationEntity> {
        self.active_reservations.get(reservation_id).or_else(|| self.reservation_history.get(reservation_id))
    }

    fn active_reservations(&self) -> Vec<&ReservationEntity> {
        self.active_reservations.all()
    }

    fn user_reservations(&self, user_id: &str) -> Vec<&ReservationEntity> {
        self.active_reservations.query(&|r: &ReservationEntity| r.user_id() == user_id)
    }

    // oldest first
    fn resource_reservations(&self, resource_id: &str) -> Vec<&ReservationEntity> {
        let mut queue = self.active_reservations.query(&|r: &ReservationEntity| r.resource_id() == resource_id);
        queue.sort_by_key(|r| r.reservation_date());
        queue
    }

    fn expired_reservations(&self) -> Vec<&ReservationEntity> {
        let now = self.now();
        self.active_reservations.query(&|r: &ReservationEntity| r.is_expired(now))
    }

    fn reservation_history(&self) -> Vec<&ReservationEntity> {
        self.reservation_history.all()
    }
}
