use std::collections::HashSet;
use std::convert::TryFrom;
use std::path::{Path, PathBuf};
use chrono::Local;
use serde_json::Value;
use tracing::{error, info, warn};
use crate::core::domain::{Configuration, Identifiable};
use crate::core::library::{LibraryError, LibraryResult};
use crate::loans::domain::CheckoutService;
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::manager::LibraryManager;
use crate::persistence::envelope::{validate_json_structure, ConfigurationDocument, ConfigurationDto, DocumentType,
                                   LoansDocument, ReservationsDocument, ResourcesDocument, UsersDocument, FORMAT_VERSION};
use crate::persistence::json_store::JsonStore;
use crate::reservations::domain::HoldService;
use crate::reservations::domain::model::ReservationEntity;
use crate::reservations::dto::ReservationDto;
use crate::resources::domain::CatalogService;
use crate::resources::domain::model::ResourceEntity;
use crate::resources::dto::{ResourceDto, RESOURCE_TYPES};
use crate::users::domain::PatronService;
use crate::users::domain::model::UserEntity;
use crate::users::dto::UserDto;
use crate::utils::date::format_date;

pub const RESOURCES_FILE: &str = "resources.json";
pub const USERS_FILE: &str = "users.json";
pub const LOANS_FILE: &str = "loans.json";
pub const RESERVATIONS_FILE: &str = "reservations.json";
pub const CONFIG_FILE: &str = "config.json";
pub const DATA_FILES: [&str; 5] = [RESOURCES_FILE, USERS_FILE, LOANS_FILE, RESERVATIONS_FILE, CONFIG_FILE];
pub const BACKUP_SUFFIX_FMT: &str = "%Y%m%d_%H%M%S";

// PersistenceService saves and loads a LibraryManager as one JSON document per entity kind.
// Whole-library operations report failure through last_error instead of an error value.
#[derive(Debug)]
pub struct PersistenceService {
    store: JsonStore,
    last_error: Option<String>,
}

impl PersistenceService {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> LibraryResult<Self> {
        let store = JsonStore::new(data_dir.as_ref())?;
        Ok(PersistenceService { store, last_error: None })
    }

    pub fn data_dir(&self) -> &Path {
        self.store.dir()
    }

    pub fn resources_path(&self) -> PathBuf {
        self.store.path(RESOURCES_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.store.path(USERS_FILE)
    }

    pub fn loans_path(&self) -> PathBuf {
        self.store.path(LOANS_FILE)
    }

    pub fn reservations_path(&self) -> PathBuf {
        self.store.path(RESERVATIONS_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.store.path(CONFIG_FILE)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn set_error(&mut self, err: &LibraryError) {
        error!(error = %err, "persistence failure");
        self.last_error = Some(err.message().to_string());
    }

    pub fn save_library_data(&mut self, manager: &LibraryManager) -> bool {
        self.clear_error();
        let results = vec![
            self.save_configuration(manager),
            self.save_resources(manager),
            self.save_users(manager),
            self.save_loans(manager),
            self.save_reservations(manager),
        ];
        let mut ok = true;
        for result in results {
            if let Err(err) = result {
                self.set_error(&err);
                ok = false;
            }
        }
        if ok {
            info!(dir = %self.data_dir().display(), "saved library data");
        }
        ok
    }

    // Replaces the manager's state with what is on disk. A category that fails to load
    // stays empty and the remaining categories still load.
    pub fn load_library_data(&mut self, manager: &mut LibraryManager) -> bool {
        self.clear_error();
        manager.clear();
        let mut ok = true;
        if let Err(err) = self.load_configuration(manager) {
            self.set_error(&err);
            ok = false;
        }
        if let Err(err) = self.load_resources(manager) {
            self.set_error(&err);
            ok = false;
        }
        let embedded = match self.read_users() {
            Ok(Some((users, embedded))) => {
                if let Err(err) = insert_all(users, |user| manager.load_user(user)) {
                    self.set_error(&err);
                    ok = false;
                }
                embedded
            }
            Ok(None) => vec![],
            Err(err) => {
                self.set_error(&err);
                ok = false;
                vec![]
            }
        };
        if let Err(err) = self.load_loans(manager) {
            self.set_error(&err);
            ok = false;
        }
        merge_embedded_loans(manager, embedded);
        if let Err(err) = self.load_reservations(manager) {
            self.set_error(&err);
            ok = false;
        }
        info!(resources = manager.total_resource_count(), users = manager.total_user_count(),
            active_loans = manager.total_active_loans(), reservations = manager.active_reservations().len(),
            "loaded library data");
        ok
    }

    pub fn save_configuration(&self, manager: &LibraryManager) -> LibraryResult<()> {
        let timestamp = format_date(&manager.now());
        let document = ConfigurationDocument {
            version: FORMAT_VERSION.to_string(),
            kind: DocumentType::Configuration.as_str().to_string(),
            timestamp: timestamp.to_string(),
            data: ConfigurationDto::from_config(manager.configuration(), &timestamp),
        };
        self.store.write(CONFIG_FILE, &document)
    }

    pub fn load_configuration(&self, manager: &mut LibraryManager) -> LibraryResult<bool> {
        let value = match self.read_document(CONFIG_FILE, DocumentType::Configuration)? {
            Some(value) => value,
            None => return Ok(false),
        };
        let document: ConfigurationDocument = serde_json::from_value(value)?;
        manager.set_configuration(Configuration::from(&document.data));
        Ok(true)
    }

    pub fn save_resources(&self, manager: &LibraryManager) -> LibraryResult<()> {
        let data = manager.all_resources().into_iter()
            .map(|r| serde_json::to_value(ResourceDto::from(r)))
            .collect::<Result<Vec<Value>, serde_json::Error>>()?;
        let document = ResourcesDocument {
            version: FORMAT_VERSION.to_string(),
            kind: DocumentType::Resources.as_str().to_string(),
            timestamp: format_date(&manager.now()),
            count: data.len(),
            data,
        };
        self.store.write(RESOURCES_FILE, &document)
    }

    pub fn load_resources(&self, manager: &mut LibraryManager) -> LibraryResult<usize> {
        let value = match self.read_document(RESOURCES_FILE, DocumentType::Resources)? {
            Some(value) => value,
            None => return Ok(0),
        };
        let document: ResourcesDocument = serde_json::from_value(value)?;
        let mut resources = vec![];
        for entry in document.data {
            let kind = entry.get("type").and_then(Value::as_str).unwrap_or_default().to_string();
            if !RESOURCE_TYPES.contains(&kind.as_str()) {
                let id = entry.get("id").and_then(Value::as_str).unwrap_or_default();
                warn!(resource_id = id, kind = kind.as_str(), "skipping resource of unknown type");
                continue;
            }
            let dto: ResourceDto = serde_json::from_value(entry)?;
            resources.push(ResourceEntity::try_from(&dto)?);
        }
        ensure_unique_ids(resources.iter().map(|r| r.id()), "resource")?;
        insert_all(resources, |resource| manager.load_resource(resource))
    }

    pub fn save_users(&self, manager: &LibraryManager) -> LibraryResult<()> {
        let data: Vec<UserDto> = manager.all_users().into_iter()
            .map(|u| UserDto::from_user(u, &manager.user_current_loans(&u.id())))
            .collect();
        let document = UsersDocument {
            version: FORMAT_VERSION.to_string(),
            kind: DocumentType::Users.as_str().to_string(),
            timestamp: format_date(&manager.now()),
            count: data.len(),
            data,
        };
        self.store.write(USERS_FILE, &document)
    }

    // Loads users only; their embedded loan copies are merged by load_library_data.
    pub fn load_users(&self, manager: &mut LibraryManager) -> LibraryResult<usize> {
        match self.read_users()? {
            Some((users, _)) => insert_all(users, |user| manager.load_user(user)),
            None => Ok(0),
        }
    }

    fn read_users(&self) -> LibraryResult<Option<(Vec<UserEntity>, Vec<LoanDto>)>> {
        let value = match self.read_document(USERS_FILE, DocumentType::Users)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let document: UsersDocument = serde_json::from_value(value)?;
        let mut users = vec![];
        let mut embedded = vec![];
        for dto in &document.data {
            users.push(UserEntity::try_from(dto)?);
            embedded.extend(dto.current_loans.iter().cloned());
        }
        ensure_unique_ids(users.iter().map(|u| u.id()), "user")?;
        let mut emails = HashSet::new();
        for user in &users {
            if !emails.insert(user.email().to_lowercase()) {
                return Err(LibraryError::duplicate_key(
                    format!("email {} is registered twice", user.email()).as_str()));
            }
        }
        Ok(Some((users, embedded)))
    }

    pub fn save_loans(&self, manager: &LibraryManager) -> LibraryResult<()> {
        let active_loans: Vec<LoanDto> = manager.active_loans().into_iter().map(LoanDto::from).collect();
        let loan_history: Vec<LoanDto> = manager.loan_history().into_iter().map(LoanDto::from).collect();
        let document = LoansDocument {
            version: FORMAT_VERSION.to_string(),
            kind: DocumentType::Loans.as_str().to_string(),
            timestamp: format_date(&manager.now()),
            active_loans_count: active_loans.len(),
            loan_history_count: loan_history.len(),
            active_loans,
            loan_history,
        };
        self.store.write(LOANS_FILE, &document)
    }

    pub fn load_loans(&self, manager: &mut LibraryManager) -> LibraryResult<usize> {
        let value = match self.read_document(LOANS_FILE, DocumentType::Loans)? {
            Some(value) => value,
            None => return Ok(0),
        };
        let document: LoansDocument = serde_json::from_value(value)?;
        let mut active = vec![];
        let mut history = vec![];
        for dto in &document.active_loans {
            let loan = LoanEntity::try_from(dto)?;
            if loan.is_active() {
                active.push(loan);
            } else {
                warn!(loan_id = dto.loan_id.as_str(), status = %dto.status, "moving closed loan to history");
                history.push(loan);
            }
        }
        for dto in &document.loan_history {
            history.push(LoanEntity::try_from(dto)?);
        }
        ensure_unique_ids(active.iter().chain(history.iter()).map(|l| l.id()), "loan")?;
        let count = insert_all(active, |loan| manager.add_active_loan(loan))?;
        Ok(count + insert_all(history, |loan| manager.add_loan_history(loan))?)
    }

    pub fn save_reservations(&self, manager: &LibraryManager) -> LibraryResult<()> {
        let active_reservations: Vec<ReservationDto> = manager.active_reservations().into_iter()
            .map(ReservationDto::from).collect();
        let reservation_history: Vec<ReservationDto> = manager.reservation_history().into_iter()
            .map(ReservationDto::from).collect();
        let document = ReservationsDocument {
            version: FORMAT_VERSION.to_string(),
            kind: DocumentType::Reservations.as_str().to_string(),
            timestamp: format_date(&manager.now()),
            active_reservations_count: active_reservations.len(),
            reservation_history_count: reservation_history.len(),
            active_reservations,
            reservation_history,
        };
        self.store.write(RESERVATIONS_FILE, &document)
    }

    pub fn load_reservations(&self, manager: &mut LibraryManager) -> LibraryResult<usize> {
        let value = match self.read_document(RESERVATIONS_FILE, DocumentType::Reservations)? {
            Some(value) => value,
            None => return Ok(0),
        };
        let document: ReservationsDocument = serde_json::from_value(value)?;
        let mut active = vec![];
        let mut history = vec![];
        for dto in &document.active_reservations {
            let reservation = ReservationEntity::try_from(dto)?;
            if reservation.is_active() {
                active.push(reservation);
            } else {
                history.push(reservation);
            }
        }
        for dto in &document.reservation_history {
            history.push(ReservationEntity::try_from(dto)?);
        }
        ensure_unique_ids(active.iter().chain(history.iter()).map(|r| r.id()), "reservation")?;
        let count = insert_all(active, |reservation| manager.add_active_reservation(reservation))?;
        Ok(count + insert_all(history, |reservation| manager.add_reservation_history(reservation))?)
    }

    // Copies every data file to <file>.backup_<suffix> and returns the suffix used.
    pub fn backup_data(&mut self, suffix: Option<&str>) -> LibraryResult<String> {
        let suffix = match suffix {
            Some(suffix) if !suffix.trim().is_empty() => suffix.trim().to_string(),
            _ => Local::now().format(BACKUP_SUFFIX_FMT).to_string(),
        };
        let mut copied = 0;
        for file in DATA_FILES {
            match self.store.backup(file, &suffix) {
                Ok(true) => copied += 1,
                Ok(false) => {}
                Err(err) => {
                    self.set_error(&err);
                    return Err(err);
                }
            }
        }
        if copied == 0 {
            let err = LibraryError::not_found("no data files to back up");
            self.set_error(&err);
            return Err(err);
        }
        info!(suffix = suffix.as_str(), files = copied, "backup complete");
        Ok(suffix)
    }

    pub fn restore_from_backup(&mut self, suffix: &str) -> LibraryResult<usize> {
        let mut restored = 0;
        for file in DATA_FILES {
            match self.store.restore(file, suffix) {
                Ok(true) => restored += 1,
                Ok(false) => {}
                Err(err) => {
                    self.set_error(&err);
                    return Err(err);
                }
            }
        }
        if restored == 0 {
            let err = LibraryError::not_found(format!("no backup files with suffix {}", suffix).as_str());
            self.set_error(&err);
            return Err(err);
        }
        info!(suffix, files = restored, "restore complete");
        Ok(restored)
    }

    // Restores the newest configuration backup set; the caller reloads afterwards.
    pub fn attempt_data_recovery(&mut self) -> bool {
        let suffix = match self.store.latest_backup_suffix(CONFIG_FILE) {
            Ok(Some(suffix)) => suffix,
            Ok(None) => {
                self.set_error(&LibraryError::not_found("no backup files found for recovery"));
                return false;
            }
            Err(err) => {
                self.set_error(&err);
                return false;
            }
        };
        warn!(suffix = suffix.as_str(), "recovering from backup");
        self.restore_from_backup(&suffix).is_ok()
    }

    fn read_document(&self, file: &str, expected: DocumentType) -> LibraryResult<Option<Value>> {
        match self.store.read(file)? {
            Some(value) => {
                validate_json_structure(&value, expected)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

fn ensure_unique_ids<I: Iterator<Item=String>>(ids: I, group: &str) -> LibraryResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(LibraryError::duplicate_key(format!("{} {} appears twice", group, id).as_str()));
        }
    }
    Ok(())
}

fn insert_all<T, F>(entities: Vec<T>, mut insert: F) -> LibraryResult<usize>
    where F: FnMut(T) -> LibraryResult<()> {
    let count = entities.len();
    for entity in entities {
        insert(entity)?;
    }
    Ok(count)
}

// Loan copies embedded in users.json only fill gaps left by loans.json.
fn merge_embedded_loans(manager: &mut LibraryManager, embedded: Vec<LoanDto>) {
    for dto in embedded {
        if manager.find_loan_by_id(&dto.loan_id).is_some() {
            continue;
        }
        match LoanEntity::try_from(&dto) {
            Ok(loan) if loan.is_active() => {
                warn!(loan_id = dto.loan_id.as_str(), "restoring loan found only in users document");
                if let Err(err) = manager.add_active_loan(loan) {
                    warn!(loan_id = dto.loan_id.as_str(), error = %err, "failed to restore embedded loan");
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!(loan_id = dto.loan_id.as_str(), error = %err, "skipping malformed embedded loan");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use chrono::Duration;
    use serde_json::{json, Value};
    use uuid::Uuid;
    use crate::core::library::{LoanStatus, ResourceStatus};
    use crate::loans::domain::CheckoutService;
    use crate::manager::fixtures::{book, setup, start, student};
    use crate::manager::LibraryManager;
    use crate::persistence::service::{PersistenceService, CONFIG_FILE, LOANS_FILE, RESOURCES_FILE, USERS_FILE};
    use crate::reservations::domain::HoldService;
    use crate::resources::domain::CatalogService;
    use crate::users::domain::PatronService;
    use crate::utils::clock::ManualClock;
    use crate::core::domain::Configuration;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("lms_data_{}", Uuid::new_v4()))
    }

    fn empty_manager() -> LibraryManager {
        LibraryManager::with_clock(Configuration::default(), Box::new(ManualClock::new(start())))
    }

    fn read_json(path: PathBuf) -> Value {
        serde_json::from_str(&fs::read_to_string(path).expect("should read file")).expect("should parse file")
    }

    fn populated() -> (LibraryManager, ManualClock, String, String) {
        let (mut manager, clock, _) = setup();
        manager.set_library_name("ENSIA Library");
        manager.add_upcoming_event("Book Fair");
        manager.add_resource(book("B1", &clock)).expect("should add resource");
        manager.add_resource(book("B2", &clock)).expect("should add resource");
        manager.add_user(student("U1", "u1@ensia.edu.dz", &clock)).expect("should add user");
        manager.add_user(student("U2", "u2@ensia.edu.dz", &clock)).expect("should add user");
        let returned = manager.borrow_resource("U2", "B2").expect("should borrow");
        assert!(manager.return_resource(&returned));
        let active = manager.borrow_resource("U1", "B1").expect("should borrow");
        manager.renew_loan(&active, 7).expect("should renew");
        let reservation = manager.reserve_resource("U2", "B1").expect("should reserve");
        (manager, clock, active, reservation)
    }

    #[test]
    fn test_should_round_trip_library_data() {
        let dir = temp_dir();
        let (manager, _, active, reservation) = populated();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        assert!(service.save_library_data(&manager));
        assert_eq!(None, service.last_error());

        let mut loaded = empty_manager();
        assert!(service.load_library_data(&mut loaded));
        assert_eq!("ENSIA Library", loaded.library_name());
        assert_eq!(vec!["Book Fair".to_string()], loaded.upcoming_events().to_vec());
        assert_eq!(2, loaded.total_resource_count());
        assert_eq!(2, loaded.total_user_count());
        assert_eq!(ResourceStatus::Borrowed, loaded.find_resource_by_id("B1").expect("should find").status());
        let loan = loaded.find_loan_by_id(&active).expect("should find loan");
        assert_eq!(LoanStatus::Renewed, loan.status());
        assert_eq!(1, loan.renewal_count());
        assert_eq!(start() + Duration::days(21), loan.due_date());
        assert_eq!(1, loaded.completed_loans().len());
        assert_eq!(1, loaded.user_current_loans("U1").len());
        assert!(loaded.find_reservation_by_id(&reservation).expect("should find reservation").is_active());
        assert_eq!(0, loaded.update_resource_availability());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_write_envelopes() {
        let dir = temp_dir();
        let (manager, _, active, _) = populated();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        assert!(service.save_library_data(&manager));

        let loans = read_json(service.loans_path());
        assert_eq!(json!("loans"), loans["type"]);
        assert_eq!(json!("1.0"), loans["version"]);
        assert_eq!(json!(1), loans["activeLoansCount"]);
        assert_eq!(json!(1), loans["loanHistoryCount"]);
        assert_eq!(json!(""), loans["activeLoans"][0]["returnDate"]);
        assert_eq!(json!("2025-06-01T09:00:00"), loans["activeLoans"][0]["borrowDate"]);

        let users = read_json(service.users_path());
        assert_eq!(json!(2), users["count"]);
        assert_eq!(json!(active), users["data"][0]["currentLoans"][0]["loanId"]);
        assert!(users["data"][0].get("loanHistory").is_none());

        let resources = read_json(service.resources_path());
        assert_eq!(json!("Book"), resources["data"][0]["type"]);
        assert_eq!(json!("978-0-13-110362-7"), resources["data"][0]["isbn"]);

        let config = read_json(service.config_path());
        assert_eq!(json!("configuration"), config["type"]);
        assert_eq!(json!(14), config["data"]["defaultLoanPeriod"]);
        assert!(service.reservations_path().is_file());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_start_empty_without_files() {
        let dir = temp_dir();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        let mut manager = empty_manager();
        assert!(service.load_library_data(&mut manager));
        assert_eq!(0, manager.total_resource_count());
        assert_eq!("ENSIARY Library Management System", manager.library_name());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_leave_failed_category_empty() {
        let dir = temp_dir();
        let (manager, _, _, _) = populated();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        assert!(service.save_library_data(&manager));
        fs::write(dir.join(RESOURCES_FILE), r#"{"version": "1.0", "type": "users", "data": []}"#)
            .expect("should overwrite resources");

        let mut loaded = empty_manager();
        assert!(!service.load_library_data(&mut loaded));
        assert!(service.last_error().expect("should record error").contains("invalid document type"));
        assert_eq!(0, loaded.total_resource_count());
        assert_eq!(2, loaded.total_user_count());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_report_malformed_json() {
        let dir = temp_dir();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        fs::write(dir.join(USERS_FILE), "{ broken").expect("should write users");
        let mut manager = empty_manager();
        assert!(!service.load_library_data(&mut manager));
        assert!(service.last_error().is_some());
        assert_eq!(0, manager.total_user_count());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_skip_unknown_resource_types() {
        let dir = temp_dir();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        let document = json!({
            "version": "1.0",
            "type": "resources",
            "timestamp": "2025-06-01T09:00:00",
            "count": 2,
            "data": [
                {"id": "M1", "type": "Map", "title": "Atlas", "author": "Mercator"},
                {"id": "A1", "type": "Article", "title": "Attention", "author": "Vaswani",
                 "publicationYear": 2017, "category": "Article", "status": "Available",
                 "dateAdded": "2025-01-10T10:00:00", "journal": "NeurIPS", "doi": "10.5555/3295222"}
            ]
        });
        fs::write(dir.join(RESOURCES_FILE), document.to_string()).expect("should write resources");
        let mut manager = empty_manager();
        assert!(service.load_library_data(&mut manager));
        assert_eq!(1, manager.total_resource_count());
        assert_eq!("Attention", manager.find_resource_by_id("A1").expect("should find").title());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_merge_embedded_loans() {
        let dir = temp_dir();
        let (manager, _, active, _) = populated();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        assert!(service.save_library_data(&manager));
        fs::remove_file(dir.join(LOANS_FILE)).expect("should remove loans");

        let mut loaded = empty_manager();
        assert!(service.load_library_data(&mut loaded));
        assert!(loaded.is_valid_loan_id(&active));
        assert_eq!(1, loaded.active_loans().len());
        assert!(loaded.loan_history().is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_should_backup_restore_and_recover() {
        let dir = temp_dir();
        let (mut manager, clock, _, _) = populated();
        let mut service = PersistenceService::new(&dir).expect("should create service");
        let err = service.backup_data(Some("early")).expect_err("should have nothing to back up");
        assert!(err.message().contains("no data files"));
        assert!(!service.attempt_data_recovery());

        assert!(service.save_library_data(&manager));
        assert_eq!("first", service.backup_data(Some("first")).expect("should backup"));
        assert!(dir.join(format!("{}.backup_first", CONFIG_FILE)).is_file());
        assert!(dir.join(format!("{}.backup_first", LOANS_FILE)).is_file());

        manager.add_resource(book("B3", &clock)).expect("should add resource");
        assert!(service.save_library_data(&manager));
        assert_eq!(5, service.restore_from_backup("first").expect("should restore"));
        let mut loaded = empty_manager();
        assert!(service.load_library_data(&mut loaded));
        assert_eq!(2, loaded.total_resource_count());
        assert!(service.restore_from_backup("missing").is_err());

        assert!(service.save_library_data(&manager));
        assert!(service.attempt_data_recovery());
        assert!(service.load_library_data(&mut loaded));
        assert_eq!(2, loaded.total_resource_count());
        let _ = fs::remove_dir_all(&dir);
    }
}
