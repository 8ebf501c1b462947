use std::collections::HashMap;
use tracing::info;
use crate::core::domain::Identifiable;
use crate::core::events::DomainEventType;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::manager::LibraryManager;
use crate::reservations::domain::HoldService;
use crate::reservations::domain::model::ReservationEntity;
use crate::users::domain::PatronService;
use crate::users::domain::model::UserEntity;
use crate::users::dto::UserDto;

impl PatronService for LibraryManager {
    fn add_user(&mut self, user: UserEntity) -> LibraryResult<()> {
        let id = user.id();
        if self.users.get(&id).is_some() {
            return Err(LibraryError::duplicate_key(format!("user with id {} already exists", id).as_str()));
        }
        if self.email_taken(user.email(), None) {
            return Err(LibraryError::duplicate_key(format!("email {} is already registered", user.email()).as_str()));
        }
        let dto = UserDto::from(&user);
        self.users.create(user)?;
        info!(user_id = id.as_str(), user_type = %dto.user_type, "added user");
        self.publish(DomainEventType::UserAdded, &id,
                     HashMap::from([("user_id".to_string(), id.clone())]), &dto);
        Ok(())
    }

    fn update_user(&mut self, user: UserEntity) -> LibraryResult<()> {
        let id = user.id();
        if self.users.get(&id).is_none() {
            return Err(LibraryError::not_found(format!("user {} not found", id).as_str()));
        }
        if self.email_taken(user.email(), Some(id.as_str())) {
            return Err(LibraryError::duplicate_key(format!("email {} is already registered", user.email()).as_str()));
        }
        self.users.update(user)?;
        info!(user_id = id.as_str(), "updated user");
        Ok(())
    }

    fn remove_user(&mut self, id: &str) -> LibraryResult<bool> {
        if self.users.get(id).is_none() {
            return Ok(false);
        }
        let current = self.current_loan_count(id);
        if current > 0 {
            return Err(LibraryError::in_use(format!("user {} still has {} item(s) on loan", id, current).as_str(),
                                            Some("currentLoans".to_string())));
        }
        let pending: Vec<String> = self.active_reservations
            .query(&|r: &ReservationEntity| r.user_id() == id)
            .iter().map(|r| r.id()).collect();
        for reservation_id in pending {
            self.cancel_reservation(&reservation_id);
        }
        match self.users.delete(id) {
            Some(removed) => {
                info!(user_id = id, "removed user");
                self.publish(DomainEventType::UserRemoved, id,
                             HashMap::from([("user_id".to_string(), id.to_string())]),
                             &UserDto::from(&removed));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn find_user_by_id(&self, id: &str) -> Option<&UserEntity> {
        self.users.get(id)
    }

    fn find_user_by_email(&self, email: &str) -> Option<&UserEntity> {
        let email = email.trim().to_lowercase();
        self.users.query(&|u: &UserEntity| u.email().to_lowercase() == email).into_iter().next()
    }

    fn all_users(&self) -> Vec<&UserEntity> {
        self.users.all()
    }

    fn search_users(&self, query: &str) -> Vec<&UserEntity> {
        if query.trim().is_empty() {
            return self.users.all();
        }
        self.users.query(&|u: &UserEntity| u.matches(query))
    }

    fn users_with_overdue_items(&self) -> Vec<&UserEntity> {
        let now = self.now();
        let overdue: Vec<&LoanEntity> = self.active_loans.query(&|l: &LoanEntity| l.is_overdue(now));
        self.users.query(&|u: &UserEntity| overdue.iter().any(|l| l.user_id() == u.id()))
    }

    fn user_current_loans(&self, user_id: &str) -> Vec<&LoanEntity> {
        self.active_loans.query(&|l: &LoanEntity| l.user_id() == user_id)
    }

    fn user_loan_history(&self, user_id: &str) -> Vec<&LoanEntity> {
        self.loan_history.query(&|l: &LoanEntity| l.user_id() == user_id)
    }

    fn can_user_borrow(&self, user_id: &str) -> bool {
        match self.users.get(user_id) {
            Some(user) => user.can_borrow(self.current_loan_count(user_id)),
            None => false,
        }
    }
}
