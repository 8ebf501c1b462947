use chrono::NaiveDateTime;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, UserStatus, UserType};
use crate::utils::validation::{is_blank, is_valid_email};

// UserEntity abstracts a library patron. Loans held by the patron live in the
// manager's loan collections and are looked up by user id.
#[derive(Debug, PartialEq, Clone)]
pub struct UserEntity {
    user_id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    address: String,
    user_type: UserType,
    status: UserStatus,
    registration_date: NaiveDateTime,
    last_activity: NaiveDateTime,
    max_borrow_limit: u32,
    notes: String,
    year: i32,
}

impl UserEntity {
    pub fn new(user_id: &str, first_name: &str, last_name: &str, email: &str,
               user_type: UserType, registered_at: NaiveDateTime) -> LibraryResult<Self> {
        if is_blank(user_id) {
            return Err(LibraryError::validation("user id cannot be empty", Some("userId".to_string())));
        }
        let mut user = UserEntity {
            user_id: user_id.trim().to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            address: String::new(),
            user_type,
            status: UserStatus::Active,
            registration_date: registered_at,
            last_activity: registered_at,
            max_borrow_limit: user_type.default_borrow_limit(),
            notes: String::new(),
            year: if user_type == UserType::Student { 1 } else { -1 },
        };
        user.set_first_name(first_name)?;
        user.set_last_name(last_name)?;
        user.set_email(email)?;
        Ok(user)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn registration_date(&self) -> NaiveDateTime {
        self.registration_date
    }

    pub fn last_activity(&self) -> NaiveDateTime {
        self.last_activity
    }

    pub fn max_borrow_limit(&self) -> u32 {
        self.max_borrow_limit
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    // Active patrons below their limit may take another loan or reservation.
    pub fn can_borrow(&self, current_loans: usize) -> bool {
        self.is_active() && current_loans < self.max_borrow_limit as usize
    }

    pub fn set_first_name(&mut self, first_name: &str) -> LibraryResult<()> {
        if is_blank(first_name) {
            return Err(LibraryError::validation("first name cannot be empty", Some("firstName".to_string())));
        }
        self.first_name = first_name.trim().to_string();
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: &str) -> LibraryResult<()> {
        if is_blank(last_name) {
            return Err(LibraryError::validation("last name cannot be empty", Some("lastName".to_string())));
        }
        self.last_name = last_name.trim().to_string();
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> LibraryResult<()> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(LibraryError::validation(format!("invalid email format {}", email).as_str(),
                                                Some("email".to_string())));
        }
        self.email = email.to_string();
        Ok(())
    }

    pub fn set_phone_number(&mut self, phone_number: &str) {
        self.phone_number = phone_number.trim().to_string();
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.trim().to_string();
    }

    // Changing the type resets the borrow limit to the type's default.
    pub fn set_user_type(&mut self, user_type: UserType) {
        self.user_type = user_type;
        self.max_borrow_limit = user_type.default_borrow_limit();
        if user_type != UserType::Student {
            self.year = -1;
        } else if !(1..=5).contains(&self.year) {
            self.year = 1;
        }
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    pub fn set_max_borrow_limit(&mut self, max_borrow_limit: u32) {
        self.max_borrow_limit = max_borrow_limit;
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    // Only students carry a study year; everyone else is pinned to -1.
    pub fn set_year(&mut self, year: i32) -> LibraryResult<()> {
        if self.user_type != UserType::Student {
            self.year = -1;
            return Ok(());
        }
        if !(1..=5).contains(&year) {
            return Err(LibraryError::validation("student year must be between 1 and 5", Some("year".to_string())));
        }
        self.year = year;
        Ok(())
    }

    pub fn set_registration_date(&mut self, registration_date: NaiveDateTime) {
        self.registration_date = registration_date;
    }

    pub fn touch(&mut self, now: NaiveDateTime) {
        self.last_activity = now;
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.first_name.to_lowercase().contains(&query) ||
            self.last_name.to_lowercase().contains(&query) ||
            self.email.to_lowercase().contains(&query) ||
            self.user_id.to_lowercase().contains(&query)
    }
}

impl Identifiable for UserEntity {
    fn id(&self) -> String {
        self.user_id.to_string()
    }
}
