use chrono::NaiveDateTime;
use crate::core::library::LibraryResult;
use crate::loans::domain::model::{LoanEntity, DEFAULT_RENEWAL_DAYS};

pub mod model;

// CheckoutService defines the lending operations of the library manager.
pub trait CheckoutService {
    fn borrow_resource(&mut self, user_id: &str, resource_id: &str) -> LibraryResult<String>;
    fn return_resource(&mut self, loan_id: &str) -> bool;
    fn renew_loan(&mut self, loan_id: &str, days: i64) -> LibraryResult<NaiveDateTime>;

    // renews for the standard two weeks
    fn renew_loan_default(&mut self, loan_id: &str) -> LibraryResult<NaiveDateTime> {
        self.renew_loan(loan_id, DEFAULT_RENEWAL_DAYS)
    }

    fn report_lost(&mut self, loan_id: &str) -> LibraryResult<()>;
    fn find_loan_by_id(&self, loan_id: &str) -> Option<&LoanEntity>;
    fn active_loans(&self) -> Vec<&LoanEntity>;
    fn overdue_loans(&self) -> Vec<&LoanEntity>;
    fn loan_history(&self) -> Vec<&LoanEntity>;
    fn completed_loans(&self) -> Vec<&LoanEntity>;
    fn user_loans(&self, user_id: &str) -> Vec<&LoanEntity>;
    fn resource_loans(&self, resource_id: &str) -> Vec<&LoanEntity>;
}
