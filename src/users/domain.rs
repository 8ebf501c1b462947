use crate::core::library::LibraryResult;
use crate::loans::domain::model::LoanEntity;
use crate::users::domain::model::UserEntity;

pub mod model;

// PatronService defines the patron operations of the library manager.
pub trait PatronService {
    fn add_user(&mut self, user: UserEntity) -> LibraryResult<()>;
    fn update_user(&mut self, user: UserEntity) -> LibraryResult<()>;
    fn remove_user(&mut self, id: &str) -> LibraryResult<bool>;
    fn find_user_by_id(&self, id: &str) -> Option<&UserEntity>;
    fn find_user_by_email(&self, email: &str) -> Option<&UserEntity>;
    fn all_users(&self) -> Vec<&UserEntity>;
    fn search_users(&self, query: &str) -> Vec<&UserEntity>;
    fn users_with_overdue_items(&self) -> Vec<&UserEntity>;
    fn user_current_loans(&self, user_id: &str) -> Vec<&LoanEntity>;
    fn user_loan_history(&self, user_id: &str) -> Vec<&LoanEntity>;
    fn can_user_borrow(&self, user_id: &str) -> bool;
}
