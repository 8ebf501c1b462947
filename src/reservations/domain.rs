use chrono::NaiveDateTime;
use crate::core::library::LibraryResult;
use crate::reservations::domain::model::ReservationEntity;

pub mod model;

// HoldService defines the reservation operations of the library manager.
pub trait HoldService {
    fn reserve_resource(&mut self, user_id: &str, resource_id: &str) -> LibraryResult<String>;
    fn cancel_reservation(&mut self, reservation_id: &str) -> bool;
    fn cancel_user_reservation(&mut self, user_id: &str, resource_id: &str) -> bool;
    fn fulfill_reservation(&mut self, reservation_id: &str) -> LibraryResult<String>;
    fn extend_reservation(&mut self, reservation_id: &str, days: i64) -> LibraryResult<NaiveDateTime>;
    fn process_expired_reservations(&mut self) -> bool;
    fn notify_when_resource_available(&self, resource_id: &str) -> Option<String>;
    fn find_reservation_by_id(&self, reservation_id: &str) -> Option<&ReservationEntity>;
    fn active_reservations(&self) -> Vec<&ReservationEntity>;
    fn user_reservations(&self, user_id: &str) -> Vec<&ReservationEntity>;
    fn resource_reservations(&self, resource_id: &str) -> Vec<&ReservationEntity>;
    fn expired_reservations(&self) -> Vec<&ReservationEntity>;
    fn reservation_history(&self) -> Vec<&ReservationEntity>;
}
