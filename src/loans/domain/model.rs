use chrono::NaiveDateTime;
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus};
use crate::utils::date::add_days;
use crate::utils::validation::is_blank;

pub const DEFAULT_MAX_RENEWALS: u32 = 3;
pub const LOST_ITEM_CHARGE: f64 = 50.0;
pub const DEFAULT_RENEWAL_DAYS: i64 = 14;

pub fn generate_loan_id() -> String {
    format!("LOAN_{}", Uuid::new_v4())
}

// LoanEntity abstracts a resource lent out to a user.
#[derive(Debug, PartialEq, Clone)]
pub struct LoanEntity {
    pub(crate) loan_id: String,
    pub(crate) user_id: String,
    pub(crate) resource_id: String,
    pub(crate) resource_title: String,
    pub(crate) borrow_date: NaiveDateTime,
    pub(crate) due_date: NaiveDateTime,
    pub(crate) return_date: Option<NaiveDateTime>,
    pub(crate) status: LoanStatus,
    pub(crate) renewal_count: u32,
    pub(crate) max_renewals: u32,
    pub(crate) fine_amount: f64,
    pub(crate) notes: String,
}

impl LoanEntity {
    pub fn new(user_id: &str, resource_id: &str, resource_title: &str,
               borrow_date: NaiveDateTime, due_date: NaiveDateTime, max_renewals: u32) -> LibraryResult<Self> {
        if is_blank(user_id) || is_blank(resource_id) {
            return Err(LibraryError::validation("loan requires user and resource ids", Some("loan".to_string())));
        }
        if due_date <= borrow_date {
            return Err(LibraryError::validation("due date must be after borrow date", Some("dueDate".to_string())));
        }
        Ok(LoanEntity {
            loan_id: generate_loan_id(),
            user_id: user_id.to_string(),
            resource_id: resource_id.to_string(),
            resource_title: resource_title.to_string(),
            borrow_date,
            due_date,
            return_date: None,
            status: LoanStatus::Active,
            renewal_count: 0,
            max_renewals,
            fine_amount: 0.0,
            notes: String::new(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn resource_title(&self) -> &str {
        &self.resource_title
    }

    pub fn borrow_date(&self) -> NaiveDateTime {
        self.borrow_date
    }

    pub fn due_date(&self) -> NaiveDateTime {
        self.due_date
    }

    pub fn return_date(&self) -> Option<NaiveDateTime> {
        self.return_date
    }

    // stored status; see effective_status for the overdue view
    pub fn status(&self) -> LoanStatus {
        self.status
    }

    pub fn renewal_count(&self) -> u32 {
        self.renewal_count
    }

    pub fn max_renewals(&self) -> u32 {
        self.max_renewals
    }

    pub fn fine_amount(&self) -> f64 {
        self.fine_amount
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.is_active() && now > self.due_date
    }

    pub fn effective_status(&self, now: NaiveDateTime) -> LoanStatus {
        if self.is_overdue(now) {
            LoanStatus::Overdue
        } else {
            self.status
        }
    }

    pub fn days_overdue(&self, now: NaiveDateTime) -> i64 {
        if self.is_overdue(now) {
            (now - self.due_date).num_days()
        } else {
            0
        }
    }

    // negative once the due date has passed
    pub fn days_until_due(&self, now: NaiveDateTime) -> i64 {
        (self.due_date - now).num_days()
    }

    pub fn calculate_fine(&self, now: NaiveDateTime, daily_rate: f64) -> f64 {
        self.days_overdue(now) as f64 * daily_rate
    }

    pub fn can_be_renewed(&self, now: NaiveDateTime) -> bool {
        matches!(self.status, LoanStatus::Active | LoanStatus::Renewed) &&
            self.renewal_count < self.max_renewals &&
            !self.is_overdue(now)
    }

    pub fn renew(&mut self, days: i64, now: NaiveDateTime) -> LibraryResult<NaiveDateTime> {
        if days <= 0 {
            return Err(LibraryError::validation("renewal days must be positive", Some("days".to_string())));
        }
        if !self.can_be_renewed(now) {
            return Err(LibraryError::not_renewable(
                format!("loan {} cannot be renewed (status {}, renewals {}/{}, overdue {})",
                        self.loan_id, self.effective_status(now), self.renewal_count,
                        self.max_renewals, self.is_overdue(now)).as_str(), None));
        }
        self.due_date = add_days(self.due_date, days, "days")?;
        self.renewal_count += 1;
        self.status = LoanStatus::Renewed;
        Ok(self.due_date)
    }

    // Records the return; a fine is assessed when the item comes back late.
    pub fn return_item(&mut self, now: NaiveDateTime, daily_rate: f64) -> LibraryResult<()> {
        if !self.is_active() {
            return Err(LibraryError::validation(
                format!("loan {} is already {}", self.loan_id, self.status).as_str(), None));
        }
        if self.is_overdue(now) {
            self.fine_amount = self.calculate_fine(now, daily_rate);
        }
        self.return_date = Some(now);
        self.status = LoanStatus::Returned;
        Ok(())
    }

    pub fn mark_as_lost(&mut self) -> LibraryResult<()> {
        if !self.is_active() {
            return Err(LibraryError::validation(
                format!("loan {} is already {}", self.loan_id, self.status).as_str(), None));
        }
        self.status = LoanStatus::Lost;
        self.fine_amount += LOST_ITEM_CHARGE;
        Ok(())
    }

    pub fn set_due_date(&mut self, due_date: NaiveDateTime) -> LibraryResult<()> {
        if due_date <= self.borrow_date {
            return Err(LibraryError::validation("due date must be after borrow date", Some("dueDate".to_string())));
        }
        self.due_date = due_date;
        Ok(())
    }

    pub fn set_return_date(&mut self, return_date: Option<NaiveDateTime>) -> LibraryResult<()> {
        if let Some(returned) = return_date {
            if returned < self.borrow_date {
                return Err(LibraryError::validation("return date cannot precede borrow date",
                                                    Some("returnDate".to_string())));
            }
        }
        self.return_date = return_date;
        Ok(())
    }

    pub fn set_fine_amount(&mut self, fine_amount: f64) -> LibraryResult<()> {
        if fine_amount < 0.0 {
            return Err(LibraryError::validation("fine amount cannot be negative", Some("fineAmount".to_string())));
        }
        self.fine_amount = fine_amount;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use crate::core::domain::Identifiable;
    use crate::core::library::{LibraryError, LoanStatus};
    use crate::loans::domain::model::{LoanEntity, DEFAULT_MAX_RENEWALS};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1).and_then(|d| d.and_hms_opt(10, 0, 0)).expect("should build date")
    }

    fn loan() -> LoanEntity {
        LoanEntity::new("U1", "B1", "Clean Code", start(), start() + Duration::days(14), DEFAULT_MAX_RENEWALS).expect("should build loan")
    }

    #[test]
    fn test_should_build_loan() {
        let loan = loan();
        assert!(loan.id().starts_with("LOAN_"));
        assert_eq!(LoanStatus::Active, loan.status());
        assert_eq!(None, loan.return_date());
        assert_eq!(14, loan.days_until_due(start()));
    }

    #[test]
    fn test_should_reject_due_before_borrow() {
        let err = LoanEntity::new("U1", "B1", "t", start(), start(), 3).expect_err("should reject dates");
        assert!(matches!(err, LibraryError::Validation { .. }));
    }

    #[test]
    fn test_should_derive_overdue() {
        let loan = loan();
        let late = start() + Duration::days(17);
        assert!(!loan.is_overdue(start() + Duration::days(14)));
        assert!(loan.is_overdue(late));
        assert_eq!(LoanStatus::Overdue, loan.effective_status(late));
        assert_eq!(LoanStatus::Active, loan.status());
        assert_eq!(3, loan.days_overdue(late));
        assert_eq!(1.5, loan.calculate_fine(late, 0.5));
    }

    #[test]
    fn test_should_renew_up_to_limit() {
        let mut loan = loan();
        let now = start() + Duration::days(1);
        for i in 1..=3 {
            let due = loan.renew(7, now).expect("should renew");
            assert_eq!(start() + Duration::days(14 + 7 * i), due);
            assert_eq!(i as u32, loan.renewal_count());
        }
        assert_eq!(LoanStatus::Renewed, loan.status());
        let err = loan.renew(7, now).expect_err("should not renew past limit");
        assert!(matches!(err, LibraryError::NotRenewable { .. }));
        assert_eq!(3, loan.renewal_count());
    }

    #[test]
    fn test_should_not_renew_overdue_loan() {
        let mut loan = loan();
        let err = loan.renew(7, start() + Duration::days(20)).expect_err("should not renew");
        assert!(matches!(err, LibraryError::NotRenewable { .. }));
        assert_eq!(0, loan.renewal_count());
        assert!(loan.renew(0, start()).is_err());
    }

    #[test]
    fn test_should_reject_renewal_beyond_calendar() {
        let mut loan = loan();
        let err = loan.renew(1_000_000_000, start()).expect_err("should reject huge renewal");
        assert!(matches!(err, LibraryError::Validation { .. }));
        assert_eq!(start() + Duration::days(14), loan.due_date());
        assert_eq!(0, loan.renewal_count());
        assert_eq!(LoanStatus::Active, loan.status());
    }

    #[test]
    fn test_should_return_once_with_fine_when_late() {
        let mut loan = loan();
        let late = start() + Duration::days(18);
        loan.return_item(late, 0.5).expect("should return");
        assert_eq!(LoanStatus::Returned, loan.status());
        assert_eq!(Some(late), loan.return_date());
        assert_eq!(2.0, loan.fine_amount());
        assert!(!loan.is_overdue(late));
        assert!(loan.return_item(late, 0.5).is_err());
    }

    #[test]
    fn test_should_mark_lost() {
        let mut loan = loan();
        loan.mark_as_lost().expect("should mark lost");
        assert_eq!(LoanStatus::Lost, loan.status());
        assert_eq!(50.0, loan.fine_amount());
        assert!(loan.mark_as_lost().is_err());
    }

    #[test]
    fn test_should_validate_setters() {
        let mut loan = loan();
        assert!(loan.set_due_date(start() - Duration::days(1)).is_err());
        assert!(loan.set_return_date(Some(start() - Duration::days(1))).is_err());
        assert!(loan.set_fine_amount(-1.0).is_err());
        loan.set_fine_amount(2.5).expect("should set fine");
        loan.set_notes("damaged cover");
        assert_eq!("damaged cover", loan.notes());
    }
}
