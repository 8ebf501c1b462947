use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The entity is referenced by an active loan and cannot be removed.
    InUse {
        message: String,
        reason_code: Option<String>,
    },
    // The user is not eligible for the requested operation.
    NotGranted {
        message: String,
        reason_code: Option<String>,
    },
    // The resource is not in a state that permits the operation (available when it must be
    // lent out, lent out when it must be available, conflicting reservation).
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
    },
    NotRenewable {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn in_use(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::InUse { message: message.to_string(), reason_code }
    }

    pub fn not_granted(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::NotGranted { message: message.to_string(), reason_code }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code }
    }

    pub fn not_renewable(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::NotRenewable { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::Validation { message, .. } => { message }
            LibraryError::DuplicateKey { message } => { message }
            LibraryError::NotFound { message } => { message }
            LibraryError::InUse { message, .. } => { message }
            LibraryError::NotGranted { message, .. } => { message }
            LibraryError::CurrentlyUnavailable { message, .. } => { message }
            LibraryError::NotRenewable { message, .. } => { message }
            LibraryError::Serialization { message } => { message }
            LibraryError::Runtime { message, .. } => { message }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("file io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::InUse { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::NotGranted { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::NotRenewable { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// ResourceStatus is the lending state of a catalog item.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceStatus {
    Available,
    Borrowed,
    Reserved,
    Maintenance,
    Lost,
}

impl From<String> for ResourceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Available" => ResourceStatus::Available,
            "Borrowed" => ResourceStatus::Borrowed,
            "Reserved" => ResourceStatus::Reserved,
            "Maintenance" => ResourceStatus::Maintenance,
            "Lost" => ResourceStatus::Lost,
            _ => ResourceStatus::Available,
        }
    }
}

impl From<ResourceStatus> for String {
    fn from(status: ResourceStatus) -> Self {
        status.to_string()
    }
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ResourceStatus::Available => write!(f, "Available"),
            ResourceStatus::Borrowed => write!(f, "Borrowed"),
            ResourceStatus::Reserved => write!(f, "Reserved"),
            ResourceStatus::Maintenance => write!(f, "Maintenance"),
            ResourceStatus::Lost => write!(f, "Lost"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceCategory {
    Book,
    Article,
    Thesis,
    DigitalContent,
    Other,
}

impl From<String> for ResourceCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Book" => ResourceCategory::Book,
            "Article" => ResourceCategory::Article,
            "Thesis" => ResourceCategory::Thesis,
            "Digital Content" => ResourceCategory::DigitalContent,
            _ => ResourceCategory::Other,
        }
    }
}

impl From<ResourceCategory> for String {
    fn from(category: ResourceCategory) -> Self {
        category.to_string()
    }
}

impl Display for ResourceCategory {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ResourceCategory::Book => write!(f, "Book"),
            ResourceCategory::Article => write!(f, "Article"),
            ResourceCategory::Thesis => write!(f, "Thesis"),
            ResourceCategory::DigitalContent => write!(f, "Digital Content"),
            ResourceCategory::Other => write!(f, "Other"),
        }
    }
}

// UserType determines the default borrow limit of a patron.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserType {
    Student,
    Teacher,
    Staff,
    Administrator,
    Guest,
}

impl UserType {
    pub fn default_borrow_limit(&self) -> u32 {
        match self {
            UserType::Student => 5,
            UserType::Teacher => 20,
            UserType::Staff => 10,
            UserType::Administrator => 15,
            UserType::Guest => 2,
        }
    }
}

impl From<String> for UserType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Student" => UserType::Student,
            "Teacher" => UserType::Teacher,
            "Staff" => UserType::Staff,
            "Administrator" => UserType::Administrator,
            "Guest" => UserType::Guest,
            _ => UserType::Guest,
        }
    }
}

impl From<UserType> for String {
    fn from(user_type: UserType) -> Self {
        user_type.to_string()
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UserType::Student => write!(f, "Student"),
            UserType::Teacher => write!(f, "Teacher"),
            UserType::Staff => write!(f, "Staff"),
            UserType::Administrator => write!(f, "Administrator"),
            UserType::Guest => write!(f, "Guest"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Expired,
}

impl From<String> for UserStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => UserStatus::Active,
            "Inactive" => UserStatus::Inactive,
            "Suspended" => UserStatus::Suspended,
            "Expired" => UserStatus::Expired,
            _ => UserStatus::Active,
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        status.to_string()
    }
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "Active"),
            UserStatus::Inactive => write!(f, "Inactive"),
            UserStatus::Suspended => write!(f, "Suspended"),
            UserStatus::Expired => write!(f, "Expired"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    Active,
    Returned,
    Overdue,
    Renewed,
    Lost,
}

impl LoanStatus {
    // Returned and Lost loans never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Returned | LoanStatus::Lost)
    }
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => LoanStatus::Active,
            "Returned" => LoanStatus::Returned,
            "Overdue" => LoanStatus::Overdue,
            "Renewed" => LoanStatus::Renewed,
            "Lost" => LoanStatus::Lost,
            _ => LoanStatus::Active,
        }
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        status.to_string()
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Active => write!(f, "Active"),
            LoanStatus::Returned => write!(f, "Returned"),
            LoanStatus::Overdue => write!(f, "Overdue"),
            LoanStatus::Renewed => write!(f, "Renewed"),
            LoanStatus::Lost => write!(f, "Lost"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Active,
    Fulfilled,
    Expired,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReservationStatus::Active)
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => ReservationStatus::Active,
            "Fulfilled" => ReservationStatus::Fulfilled,
            "Expired" => ReservationStatus::Expired,
            "Cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Active,
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.to_string()
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReservationStatus::Active => write!(f, "Active"),
            ReservationStatus::Fulfilled => write!(f, "Fulfilled"),
            ReservationStatus::Expired => write!(f, "Expired"),
            ReservationStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{LibraryError, LoanStatus, ReservationStatus, ResourceCategory, ResourceStatus, UserStatus, UserType};

    #[test]
    fn test_should_create_validation_error() {
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation{ message: _, reason_code: _ }));
    }

    #[test]
    fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[test]
    fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[test]
    fn test_should_create_in_use_error() {
        assert!(matches!(LibraryError::in_use("test", None), LibraryError::InUse{ message: _, reason_code: _ }));
    }

    #[test]
    fn test_should_create_not_granted_error() {
        assert!(matches!(LibraryError::not_granted("test", None), LibraryError::NotGranted{ message: _, reason_code: _ }));
    }

    #[test]
    fn test_should_create_unavailable_error() {
        assert!(matches!(LibraryError::unavailable("test", None), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _ }));
    }

    #[test]
    fn test_should_create_not_renewable_error() {
        assert!(matches!(LibraryError::not_renewable("test", None), LibraryError::NotRenewable{ message: _, reason_code: _ }));
    }

    #[test]
    fn test_should_convert_io_and_json_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(LibraryError::from(io), LibraryError::Runtime{ message: _, reason_code: _ }));
        let json = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        assert!(matches!(LibraryError::from(json), LibraryError::Serialization{ message: _ }));
    }

    #[test]
    fn test_should_expose_message() {
        assert_eq!("no such loan", LibraryError::not_found("no such loan").message());
        assert_eq!("limit", LibraryError::not_granted("limit", Some("400".to_string())).message());
    }

    #[test]
    fn test_should_format_resource_status() {
        let statuses = vec![
            ResourceStatus::Available,
            ResourceStatus::Borrowed,
            ResourceStatus::Reserved,
            ResourceStatus::Maintenance,
            ResourceStatus::Lost,
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = ResourceStatus::from(str);
            assert_eq!(status, str_status);
        }
        assert_eq!(ResourceStatus::Available, ResourceStatus::from("bogus".to_string()));
    }

    #[test]
    fn test_should_format_category_with_spaces() {
        assert_eq!("Digital Content", ResourceCategory::DigitalContent.to_string());
        assert_eq!(ResourceCategory::DigitalContent, ResourceCategory::from("Digital Content".to_string()));
        assert_eq!(ResourceCategory::Other, ResourceCategory::from("Map".to_string()));
    }

    #[test]
    fn test_should_map_user_type_to_borrow_limit() {
        assert_eq!(5, UserType::Student.default_borrow_limit());
        assert_eq!(20, UserType::Teacher.default_borrow_limit());
        assert_eq!(10, UserType::Staff.default_borrow_limit());
        assert_eq!(15, UserType::Administrator.default_borrow_limit());
        assert_eq!(2, UserType::Guest.default_borrow_limit());
        assert_eq!(UserStatus::Suspended, UserStatus::from("Suspended".to_string()));
    }

    #[test]
    fn test_should_serialize_status_as_display_string() {
        let json = serde_json::to_string(&ResourceCategory::DigitalContent).expect("should serialize");
        assert_eq!("\"Digital Content\"", json);
        let status: LoanStatus = serde_json::from_str("\"Renewed\"").expect("should parse");
        assert_eq!(LoanStatus::Renewed, status);
        let unknown: ReservationStatus = serde_json::from_str("\"Whatever\"").expect("should parse");
        assert_eq!(ReservationStatus::Active, unknown);
    }

    #[test]
    fn test_should_classify_terminal_states() {
        assert!(LoanStatus::Returned.is_terminal());
        assert!(LoanStatus::Lost.is_terminal());
        assert!(!LoanStatus::Renewed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::Active.is_terminal());
    }
}
