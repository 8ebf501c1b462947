use std::convert::TryFrom;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, ReservationStatus};
use crate::reservations::domain::model::ReservationEntity;
use crate::utils::date::serializer;

// ReservationDto is the persisted shape of a reservation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub reservation_id: String,
    pub user_id: String,
    pub resource_id: String,
    #[serde(default)]
    pub resource_title: String,
    #[serde(with = "serializer")]
    pub reservation_date: NaiveDateTime,
    #[serde(with = "serializer")]
    pub expiration_date: NaiveDateTime,
    pub status: ReservationStatus,
    #[serde(default)]
    pub notes: String,
}

impl From<&ReservationEntity> for ReservationDto {
    fn from(other: &ReservationEntity) -> ReservationDto {
        ReservationDto {
            reservation_id: other.reservation_id.to_string(),
            user_id: other.user_id.to_string(),
            resource_id: other.resource_id.to_string(),
            resource_title: other.resource_title.to_string(),
            reservation_date: other.reservation_date,
            expiration_date: other.expiration_date,
            status: other.status,
            notes: other.notes.to_string(),
        }
    }
}

impl TryFrom<&ReservationDto> for ReservationEntity {
    type Error = LibraryError;

    fn try_from(other: &ReservationDto) -> Result<Self, Self::Error> {
        if other.reservation_id.trim().is_empty() || other.user_id.trim().is_empty() ||
            other.resource_id.trim().is_empty() {
            return Err(LibraryError::validation("reservation requires reservation, user and resource ids",
                                                Some("reservation".to_string())));
        }
        if other.expiration_date < other.reservation_date {
            return Err(LibraryError::validation("expiration date cannot precede reservation date",
                                                Some("expirationDate".to_string())));
        }
        Ok(ReservationEntity {
            reservation_id: other.reservation_id.to_string(),
            user_id: other.user_id.to_string(),
            resource_id: other.resource_id.to_string(),
            resource_title: other.resource_title.to_string(),
            reservation_date: other.reservation_date,
            expiration_date: other.expiration_date,
            status: other.status,
            notes: other.notes.to_string(),
        })
    }
}
