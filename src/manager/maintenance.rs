use serde::Serialize;
use tracing::{info, warn};
use crate::core::domain::Identifiable;
use crate::core::events::DomainEventType;
use crate::core::library::ResourceStatus;
use crate::core::repository::Repository;
use crate::loans::domain::CheckoutService;
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::manager::{event_metadata, LibraryManager};
use crate::reservations::domain::HoldService;

// MaintenanceReport summarizes one daily maintenance pass.
#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub struct MaintenanceReport {
    pub expired_reservations: usize,
    pub overdue_loans: usize,
    pub availability_mismatches: usize,
}

impl LibraryManager {
    // Expires stale reservations, re-announces overdue loans and checks resource availability.
    pub fn perform_daily_maintenance(&mut self) -> MaintenanceReport {
        let expired_reservations = self.expired_reservations().len();
        self.process_expired_reservations();
        let overdue_loans = self.notify_overdue_loans();
        let availability_mismatches = self.update_resource_availability();
        let report = MaintenanceReport { expired_reservations, overdue_loans, availability_mismatches };
        info!(expired = report.expired_reservations, overdue = report.overdue_loans,
            mismatches = report.availability_mismatches, "daily maintenance complete");
        report
    }

    pub fn notify_overdue_loans(&self) -> usize {
        let now = self.now();
        let overdue = self.overdue_loans();
        for loan in &overdue {
            warn!(loan_id = loan.id().as_str(), user_id = loan.user_id(),
                days_overdue = loan.days_overdue(now), "item overdue");
            self.publish(DomainEventType::ItemOverdue, &loan.id(),
                         event_metadata(loan.user_id(), loan.resource_id()), &LoanDto::from(*loan));
        }
        overdue.len()
    }

    // Reports resources whose Borrowed status disagrees with the active loans; nothing is changed.
    pub fn update_resource_availability(&self) -> usize {
        let mut mismatches = 0;
        for resource in self.resources.all() {
            let id = resource.id();
            let on_loan = !self.active_loans.query(&|l: &LoanEntity| l.resource_id() == id).is_empty();
            let borrowed = resource.status() == ResourceStatus::Borrowed;
            if on_loan != borrowed {
                warn!(resource_id = id.as_str(), status = %resource.status(), on_loan,
                    "resource status does not match active loans");
                mismatches += 1;
            }
        }
        mismatches
    }
}
