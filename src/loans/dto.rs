use std::convert::TryFrom;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LoanStatus};
use crate::loans::domain::model::{LoanEntity, DEFAULT_MAX_RENEWALS};
use crate::utils::date::{optional_serializer, serializer};

// LoanDto is the persisted shape of a loan.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDto {
    pub loan_id: String,
    pub user_id: String,
    pub resource_id: String,
    #[serde(default)]
    pub resource_title: String,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_date: NaiveDateTime,
    #[serde(with = "optional_serializer", default)]
    pub return_date: Option<NaiveDateTime>,
    pub status: LoanStatus,
    #[serde(default)]
    pub renewal_count: u32,
    #[serde(default = "default_max_renewals")]
    pub max_renewals: u32,
    #[serde(default)]
    pub fine_amount: f64,
    #[serde(default)]
    pub notes: String,
}

fn default_max_renewals() -> u32 {
    DEFAULT_MAX_RENEWALS
}

impl From<&LoanEntity> for LoanDto {
    fn from(other: &LoanEntity) -> LoanDto {
        LoanDto {
            loan_id: other.loan_id.to_string(),
            user_id: other.user_id.to_string(),
            resource_id: other.resource_id.to_string(),
            resource_title: other.resource_title.to_string(),
            borrow_date: other.borrow_date,
            due_date: other.due_date,
            return_date: other.return_date,
            status: other.status,
            renewal_count: other.renewal_count,
            max_renewals: other.max_renewals,
            fine_amount: other.fine_amount,
            notes: other.notes.to_string(),
        }
    }
}

impl TryFrom<&LoanDto> for LoanEntity {
    type Error = LibraryError;

    fn try_from(other: &LoanDto) -> Result<Self, Self::Error> {
        if other.loan_id.trim().is_empty() {
            return Err(LibraryError::validation("loan id cannot be empty", Some("loanId".to_string())));
        }
        let mut loan = LoanEntity::new(&other.user_id, &other.resource_id, &other.resource_title,
                                       other.borrow_date, other.due_date, other.max_renewals)?;
        loan.loan_id = other.loan_id.to_string();
        loan.set_return_date(other.return_date)?;
        loan.set_fine_amount(other.fine_amount)?;
        loan.status = other.status;
        loan.renewal_count = other.renewal_count;
        loan.notes = other.notes.to_string();
        Ok(loan)
    }
}
