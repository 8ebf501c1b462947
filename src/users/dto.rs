use std::convert::TryFrom;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, UserStatus, UserType};
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::users::domain::model::UserEntity;
use crate::utils::date::serializer;

// UserDto is the persisted shape of a patron. It embeds a copy of the patron's active
// loans for compatibility; the standalone loans document remains authoritative.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    pub user_type: UserType,
    pub status: UserStatus,
    #[serde(with = "serializer")]
    pub registration_date: NaiveDateTime,
    #[serde(with = "serializer")]
    pub last_activity: NaiveDateTime,
    pub max_borrow_limit: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default)]
    pub current_loans: Vec<LoanDto>,
}

fn default_year() -> i32 {
    -1
}

impl UserDto {
    pub fn from_user(user: &UserEntity, current_loans: &[&LoanEntity]) -> Self {
        UserDto {
            user_id: user.id(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            phone_number: user.phone_number().to_string(),
            address: user.address().to_string(),
            user_type: user.user_type(),
            status: user.status(),
            registration_date: user.registration_date(),
            last_activity: user.last_activity(),
            max_borrow_limit: user.max_borrow_limit(),
            notes: user.notes().to_string(),
            year: user.year(),
            current_loans: current_loans.iter().map(|loan| LoanDto::from(*loan)).collect(),
        }
    }
}

impl From<&UserEntity> for UserDto {
    fn from(other: &UserEntity) -> UserDto {
        UserDto::from_user(other, &[])
    }
}

impl TryFrom<&UserDto> for UserEntity {
    type Error = LibraryError;

    fn try_from(other: &UserDto) -> Result<Self, Self::Error> {
        let mut user = UserEntity::new(&other.user_id, &other.first_name, &other.last_name,
                                       &other.email, other.user_type, other.registration_date)?;
        user.set_phone_number(&other.phone_number);
        user.set_address(&other.address);
        user.set_status(other.status);
        user.set_max_borrow_limit(other.max_borrow_limit);
        user.set_notes(&other.notes);
        user.touch(other.last_activity);
        if other.user_type == UserType::Student {
            user.set_year(other.year)?;
        }
        Ok(user)
    }
}
