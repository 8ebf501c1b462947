use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::domain::{Configuration, DEFAULT_LIBRARY_NAME, MAX_LOAN_PERIOD_DAYS};
use crate::core::library::{LibraryError, LibraryResult};
use crate::loans::domain::model::DEFAULT_MAX_RENEWALS;
use crate::loans::dto::LoanDto;
use crate::reservations::domain::model::DEFAULT_EXPIRATION_DAYS;
use crate::reservations::dto::ReservationDto;
use crate::users::dto::UserDto;

pub const FORMAT_VERSION: &str = "1.0";
pub const DEFAULT_LOAN_PERIOD_DAYS: i64 = 14;
pub const DEFAULT_DAILY_FINE_RATE: f64 = 0.5;

// DocumentType names the "type" tag every envelope carries.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DocumentType {
    Resources,
    Users,
    Loans,
    Reservations,
    Configuration,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Resources => "resources",
            DocumentType::Users => "users",
            DocumentType::Loans => "loans",
            DocumentType::Reservations => "reservations",
            DocumentType::Configuration => "configuration",
        }
    }
}

// Checks that a document is an object tagged with the expected type and carrying a version.
pub fn validate_json_structure(document: &Value, expected: DocumentType) -> LibraryResult<()> {
    let root = document.as_object()
        .ok_or_else(|| LibraryError::serialization("document root is not a JSON object"))?;
    match root.get("type").and_then(Value::as_str) {
        Some(kind) if kind == expected.as_str() => {}
        other => {
            return Err(LibraryError::serialization(
                format!("invalid document type {:?}, expected {}", other, expected.as_str()).as_str()));
        }
    }
    if !root.contains_key("version") {
        return Err(LibraryError::serialization("missing version information"));
    }
    Ok(())
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesDocument {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub count: usize,
    // entries stay raw so unknown resource types can be skipped one by one
    #[serde(default)]
    pub data: Vec<Value>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersDocument {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub data: Vec<UserDto>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoansDocument {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub active_loans_count: usize,
    #[serde(default)]
    pub loan_history_count: usize,
    #[serde(default)]
    pub active_loans: Vec<LoanDto>,
    #[serde(default)]
    pub loan_history: Vec<LoanDto>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsDocument {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub active_reservations_count: usize,
    #[serde(default)]
    pub reservation_history_count: usize,
    #[serde(default)]
    pub active_reservations: Vec<ReservationDto>,
    #[serde(default)]
    pub reservation_history: Vec<ReservationDto>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDocument {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: String,
    pub data: ConfigurationDto,
}

// ConfigurationDto is the persisted shape of the library configuration; the lending
// parameters are optional so older documents keep loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDto {
    #[serde(default)]
    pub library_name: String,
    #[serde(default)]
    pub operating_hours: String,
    #[serde(default)]
    pub default_loan_period: i64,
    #[serde(default)]
    pub upcoming_events: Vec<String>,
    #[serde(default)]
    pub last_saved: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_renewals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_fine_rate: Option<f64>,
}

impl ConfigurationDto {
    pub fn from_config(config: &Configuration, last_saved: &str) -> Self {
        ConfigurationDto {
            library_name: config.library_name.to_string(),
            operating_hours: config.operating_hours.to_string(),
            default_loan_period: config.default_loan_period_days,
            upcoming_events: config.upcoming_events.clone(),
            last_saved: last_saved.to_string(),
            max_renewals: Some(config.max_renewals),
            reservation_days: Some(config.reservation_expiration_days),
            daily_fine_rate: Some(config.daily_fine_rate),
        }
    }
}

impl From<&ConfigurationDto> for Configuration {
    fn from(other: &ConfigurationDto) -> Configuration {
        let library_name = if other.library_name.trim().is_empty() {
            DEFAULT_LIBRARY_NAME
        } else {
            other.library_name.as_str()
        };
        let mut config = Configuration::new(library_name);
        if !other.operating_hours.trim().is_empty() {
            config.operating_hours = other.operating_hours.to_string();
        }
        config.default_loan_period_days = if (1..=MAX_LOAN_PERIOD_DAYS).contains(&other.default_loan_period) {
            other.default_loan_period
        } else {
            DEFAULT_LOAN_PERIOD_DAYS
        };
        for event in &other.upcoming_events {
            config.add_upcoming_event(event);
        }
        config.max_renewals = other.max_renewals.unwrap_or(DEFAULT_MAX_RENEWALS);
        config.reservation_expiration_days = other.reservation_days
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_EXPIRATION_DAYS);
        config.daily_fine_rate = other.daily_fine_rate
            .filter(|rate| *rate >= 0.0)
            .unwrap_or(DEFAULT_DAILY_FINE_RATE);
        config
    }
}
