use serde::{Deserialize, Serialize};

pub const DEFAULT_LIBRARY_NAME: &str = "ENSIARY Library Management System";
pub const MAX_LOAN_PERIOD_DAYS: i64 = 365;
pub const DEFAULT_OPERATING_HOURS: &str = "Monday-Friday: 8:00 AM - 8:00 PM, Saturday-Sunday: 10:00 AM - 6:00 PM";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub library_name: String,
    pub operating_hours: String,
    pub default_loan_period_days: i64,
    pub upcoming_events: Vec<String>,
    pub max_renewals: u32,
    pub reservation_expiration_days: i64,
    pub daily_fine_rate: f64,
}

impl Configuration {
    pub fn new(library_name: &str) -> Self {
        Configuration {
            library_name: library_name.to_string(),
            operating_hours: DEFAULT_OPERATING_HOURS.to_string(),
            default_loan_period_days: 14,
            upcoming_events: vec![],
            max_renewals: 3,
            reservation_expiration_days: 7,
            daily_fine_rate: 0.5,
        }
    }

    // adds an event unless it is blank or already listed
    pub fn add_upcoming_event(&mut self, event: &str) -> bool {
        let event = event.trim();
        if event.is_empty() || self.upcoming_events.iter().any(|e| e == event) {
            return false;
        }
        self.upcoming_events.push(event.to_string());
        true
    }

    pub fn remove_upcoming_event(&mut self, event: &str) -> bool {
        let before = self.upcoming_events.len();
        self.upcoming_events.retain(|e| e != event);
        before != self.upcoming_events.len()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_LIBRARY_NAME)
    }
}
