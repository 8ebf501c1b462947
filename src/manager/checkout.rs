use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use crate::core::domain::Identifiable;
use crate::core::events::DomainEventType;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus, ResourceStatus};
use crate::core::repository::Repository;
use crate::loans::domain::CheckoutService;
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::manager::{event_metadata, LibraryManager};
use crate::reservations::domain::HoldService;
use crate::reservations::domain::model::ReservationEntity;
use crate::utils::date::add_days;

impl LibraryManager {
    // A borrower's own pending hold on the item is satisfied by the loan.
    fn fulfill_own_reservation(&mut self, user_id: &str, resource_id: &str, now: NaiveDateTime) {
        let own: Vec<String> = self.active_reservations
            .query(&|r: &ReservationEntity| {
                r.user_id() == user_id && r.resource_id() == resource_id && r.can_be_fulfilled(now)
            })
            .iter().map(|r| r.id()).collect();
        for reservation_id in own {
            if let Some(mut reservation) = self.active_reservations.delete(&reservation_id) {
                if let Err(err) = reservation.fulfill(now) {
                    warn!(reservation_id = reservation_id.as_str(), error = %err, "failed to fulfill reservation");
                }
                if let Err(err) = self.reservation_history.create(reservation) {
                    warn!(reservation_id = reservation_id.as_str(), error = %err, "failed to archive reservation");
                }
                info!(reservation_id = reservation_id.as_str(), user_id, resource_id, "fulfilled reservation");
            }
        }
    }

    // Moves a closed loan out of the active set and releases its resource with the given status.
    fn close_loan(&mut self, loan: LoanEntity, resource_status: ResourceStatus, now: NaiveDateTime) {
        let loan_id = loan.id();
        let resource_id = loan.resource_id().to_string();
        let user_id = loan.user_id().to_string();
        self.active_loans.delete(&loan_id);
        if let Err(err) = self.loan_history.create(loan) {
            warn!(loan_id = loan_id.as_str(), error = %err, "failed to archive loan");
        }
        match self.resources.get_mut(&resource_id) {
            Some(resource) => resource.set_status(resource_status),
            None => warn!(loan_id = loan_id.as_str(), resource_id = resource_id.as_str(), "loan refers to unknown resource"),
        }
        if let Some(user) = self.users.get_mut(&user_id) {
            user.touch(now);
        }
    }
}

impl CheckoutService for LibraryManager {
    fn borrow_resource(&mut self, user_id: &str, resource_id: &str) -> LibraryResult<String> {
        let now = self.now();
        let current = self.current_loan_count(user_id);
        let user = self.users.get(user_id)
            .ok_or_else(|| LibraryError::not_found(format!("user {} not found", user_id).as_str()))?;
        if !user.can_borrow(current) {
            return Err(LibraryError::not_granted(
                format!("user {} ({}) cannot borrow with {} of {} items on loan",
                        user_id, user.status(), current, user.max_borrow_limit()).as_str(),
                Some("borrowLimit".to_string())));
        }
        let resource = self.resources.get(resource_id)
            .ok_or_else(|| LibraryError::not_found(format!("resource {} not found", resource_id).as_str()))?;
        if !resource.is_available() {
            return Err(LibraryError::unavailable(
                format!("resource {} is {}", resource_id, resource.status()).as_str(),
                Some(resource.status().to_string())));
        }
        let due_date = add_days(now, self.config.default_loan_period_days, "defaultLoanPeriod")?;
        let loan = LoanEntity::new(user_id, resource_id, resource.title(), now, due_date, self.config.max_renewals)?;
        let loan_id = loan.id();
        let dto = LoanDto::from(&loan);

        self.active_loans.create(loan)?;
        if let Some(resource) = self.resources.get_mut(resource_id) {
            resource.set_status(ResourceStatus::Borrowed);
        }
        if let Some(user) = self.users.get_mut(user_id) {
            user.touch(now);
        }
        self.fulfill_own_reservation(user_id, resource_id, now);

        info!(loan_id = loan_id.as_str(), user_id, resource_id, due_date = %due_date, "borrowed resource");
        self.publish(DomainEventType::ResourceBorrowed, &loan_id, event_metadata(user_id, resource_id), &dto);
        Ok(loan_id)
    }

    fn return_resource(&mut self, loan_id: &str) -> bool {
        let now = self.now();
        let mut loan = match self.active_loans.get(loan_id) {
            Some(loan) => loan.clone(),
            None => {
                debug!(loan_id, "no active loan to return");
                return false;
            }
        };
        if let Err(err) = loan.return_item(now, self.config.daily_fine_rate) {
            warn!(loan_id, error = %err, "failed to return loan");
            return false;
        }
        let resource_id = loan.resource_id().to_string();
        let user_id = loan.user_id().to_string();
        let dto = LoanDto::from(&loan);
        if loan.fine_amount() > 0.0 {
            info!(loan_id, fine = loan.fine_amount(), "returned late");
        }
        self.close_loan(loan, ResourceStatus::Available, now);

        info!(loan_id, user_id = user_id.as_str(), resource_id = resource_id.as_str(), "returned resource");
        self.publish(DomainEventType::ResourceReturned, loan_id, event_metadata(&user_id, &resource_id), &dto);
        self.notify_when_resource_available(&resource_id);
        true
    }

    fn renew_loan(&mut self, loan_id: &str, days: i64) -> LibraryResult<NaiveDateTime> {
        let now = self.now();
        let loan = self.active_loans.get_mut(loan_id)
            .ok_or_else(|| LibraryError::not_found(format!("loan {} not found", loan_id).as_str()))?;
        let due_date = loan.renew(days, now)?;
        let metadata = event_metadata(loan.user_id(), loan.resource_id());
        let dto = LoanDto::from(&*loan);
        info!(loan_id, due_date = %due_date, renewals = dto.renewal_count, "renewed loan");
        self.publish(DomainEventType::LoanRenewed, loan_id, metadata, &dto);
        Ok(due_date)
    }

    fn report_lost(&mut self, loan_id: &str) -> LibraryResult<()> {
        let now = self.now();
        let mut loan = self.active_loans.get(loan_id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("loan {} not found", loan_id).as_str()))?;
        loan.mark_as_lost()?;
        warn!(loan_id, resource_id = loan.resource_id(), fine = loan.fine_amount(), "reported lost");
        self.close_loan(loan, ResourceStatus::Lost, now);
        Ok(())
    }

    fn find_loan_by_id(&self, loan_id: &str) -> Option<&LoanEntity> {
        self.active_loans.get(loan_id).or_else(|| self.loan_history.get(loan_id))
    }

    fn active_loans(&self) -> Vec<&LoanEntity> {
        self.active_loans.all()
    }

    fn overdue_loans(&self) -> Vec<&LoanEntity> {
        let now = self.now();
        self.active_loans.query(&|l: &LoanEntity| l.is_overdue(now))
    }

    fn loan_history(&self) -> Vec<&LoanEntity> {
        self.loan_history.all()
    }

    fn completed_loans(&self) -> Vec<&LoanEntity> {
        self.loan_history.query(&|l: &LoanEntity| l.status() == LoanStatus::Returned)
    }

    fn user_loans(&self, user_id: &str) -> Vec<&LoanEntity> {
        let mut loans = self.active_loans.query(&|l: &LoanEntity| l.user_id() == user_id);
        loans.extend(self.loan_history.query(&|l: &LoanEntity| l.user_id() == user_id));
        loans
    }

    fn resource_loans(&self, resource_id: &str) -> Vec<&LoanEntity> {
        let mut loans = self.active_loans.query(&|l: &LoanEntity| l.resource_id() == resource_id);
        loans.extend(self.loan_history.query(&|l: &LoanEntity| l.resource_id() == resource_id));
        loans
    }
}
