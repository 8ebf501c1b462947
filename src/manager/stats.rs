use std::collections::HashMap;
use crate::core::domain::Identifiable;
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::manager::LibraryManager;
use crate::resources::domain::model::ResourceEntity;
use crate::users::domain::model::UserEntity;

impl LibraryManager {
    pub fn total_resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn available_resource_count(&self) -> usize {
        self.resources.query(&|r: &ResourceEntity| r.is_available()).len()
    }

    pub fn total_user_count(&self) -> usize {
        self.users.len()
    }

    pub fn active_user_count(&self) -> usize {
        self.users.query(&|u: &UserEntity| u.is_active()).len()
    }

    pub fn total_active_loans(&self) -> usize {
        self.active_loans.len()
    }

    pub fn total_overdue_loans(&self) -> usize {
        let now = self.now();
        self.active_loans.query(&|l: &LoanEntity| l.is_overdue(now)).len()
    }

    // Counts every loan ever made per resource, most borrowed first.
    pub fn most_borrowed_resources(&self, limit: usize) -> Vec<(&ResourceEntity, usize)> {
        let counts = self.count_loans(|l| l.resource_id());
        let mut ranked: Vec<(&ResourceEntity, usize)> = self.resources.all().into_iter()
            .filter_map(|r| counts.get(r.id().as_str()).map(|n| (r, *n)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.title().cmp(b.0.title())));
        ranked.truncate(limit);
        ranked
    }

    pub fn most_active_users(&self, limit: usize) -> Vec<(&UserEntity, usize)> {
        let counts = self.count_loans(|l| l.user_id());
        let mut ranked: Vec<(&UserEntity, usize)> = self.users.all().into_iter()
            .filter_map(|u| counts.get(u.id().as_str()).map(|n| (u, *n)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.full_name().cmp(&b.0.full_name())));
        ranked.truncate(limit);
        ranked
    }

    fn count_loans<'a, F>(&'a self, key: F) -> HashMap<&'a str, usize>
        where F: Fn(&'a LoanEntity) -> &'a str {
        let mut counts = HashMap::new();
        for loan in self.active_loans.all().into_iter().chain(self.loan_history.all()) {
            *counts.entry(key(loan)).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::core::domain::Identifiable;
    use crate::core::library::{ResourceStatus, UserStatus};
    use crate::loans::domain::CheckoutService;
    use crate::manager::fixtures::{book, setup, student};
    use crate::resources::domain::CatalogService;
    use crate::users::domain::PatronService;

    #[test]
    fn test_should_count_library_totals() {
        let (mut manager, clock, _) = setup();
        for id in ["B1", "B2", "B3"] {
            manager.add_resource(book(id, &clock)).expect("should add resource");
        }
        manager.add_user(student("U1", "u1@ensia.edu.dz", &clock)).expect("should add user");
        let mut inactive = student("U2", "u2@ensia.edu.dz", &clock);
        inactive.set_status(UserStatus::Inactive);
        manager.add_user(inactive).expect("should add user");
        manager.change_resource_status("B3", ResourceStatus::Maintenance).expect("should change status");
        manager.borrow_resource("U1", "B1").expect("should borrow");

        assert_eq!(3, manager.total_resource_count());
        assert_eq!(1, manager.available_resource_count());
        assert_eq!(2, manager.total_user_count());
        assert_eq!(1, manager.active_user_count());
        assert_eq!(1, manager.total_active_loans());
        assert_eq!(0, manager.total_overdue_loans());
        clock.advance(Duration::days(15));
        assert_eq!(1, manager.total_overdue_loans());
    }

    #[test]
    fn test_should_rank_borrowing_activity() {
        let (mut manager, clock, _) = setup();
        manager.add_resource(book("B1", &clock)).expect("should add resource");
        manager.add_resource(book("B2", &clock)).expect("should add resource");
        manager.add_resource(book("B3", &clock)).expect("should add resource");
        manager.add_user(student("U1", "u1@ensia.edu.dz", &clock)).expect("should add user");
        manager.add_user(student("U2", "u2@ensia.edu.dz", &clock)).expect("should add user");
        for _ in 0..2 {
            let loan_id = manager.borrow_resource("U1", "B2").expect("should borrow");
            assert!(manager.return_resource(&loan_id));
        }
        manager.borrow_resource("U2", "B1").expect("should borrow");
        manager.borrow_resource("U1", "B2").expect("should borrow");

        let resources: Vec<(String, usize)> = manager.most_borrowed_resources(5).into_iter()
            .map(|(r, n)| (r.id(), n)).collect();
        assert_eq!(vec![("B2".to_string(), 3), ("B1".to_string(), 1)], resources);
        let users: Vec<(String, usize)> = manager.most_active_users(1).into_iter()
            .map(|(u, n)| (u.id(), n)).collect();
        assert_eq!(vec![("U1".to_string(), 3)], users);
    }
}
