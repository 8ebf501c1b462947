use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::validation::{is_blank, is_valid_url};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    EBook,
    AudioBook,
    Video,
    Document,
    Software,
    Database,
    WebResource,
}

impl From<String> for ContentType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "E-Book" => ContentType::EBook,
            "Audio Book" => ContentType::AudioBook,
            "Video" => ContentType::Video,
            "Document" => ContentType::Document,
            "Software" => ContentType::Software,
            "Database" => ContentType::Database,
            "Web Resource" => ContentType::WebResource,
            _ => ContentType::EBook,
        }
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        content_type.to_string()
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ContentType::EBook => write!(f, "E-Book"),
            ContentType::AudioBook => write!(f, "Audio Book"),
            ContentType::Video => write!(f, "Video"),
            ContentType::Document => write!(f, "Document"),
            ContentType::Software => write!(f, "Software"),
            ContentType::Database => write!(f, "Database"),
            ContentType::WebResource => write!(f, "Web Resource"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessType {
    Online,
    Download,
    Streaming,
}

impl From<String> for AccessType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Online" => AccessType::Online,
            "Download" => AccessType::Download,
            "Streaming" => AccessType::Streaming,
            _ => AccessType::Online,
        }
    }
}

impl From<AccessType> for String {
    fn from(access_type: AccessType) -> Self {
        access_type.to_string()
    }
}

impl Display for AccessType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AccessType::Online => write!(f, "Online"),
            AccessType::Download => write!(f, "Download"),
            AccessType::Streaming => write!(f, "Streaming"),
        }
    }
}

// DigitalContentDetails holds the electronic-access part of a catalog item.
#[derive(Debug, PartialEq, Clone)]
pub struct DigitalContentDetails {
    content_type: ContentType,
    access_type: AccessType,
    file_format: String,
    file_size: String,
    url: String,
    platform: String,
    requires_authentication: bool,
    simultaneous_users: i32,
    system_requirements: String,
}

impl DigitalContentDetails {
    pub fn new(content_type: ContentType, access_type: AccessType, file_format: &str, url: &str) -> LibraryResult<Self> {
        let mut details = DigitalContentDetails {
            content_type,
            access_type,
            file_format: String::new(),
            file_size: String::new(),
            url: String::new(),
            platform: String::new(),
            requires_authentication: false,
            simultaneous_users: 1,
            system_requirements: String::new(),
        };
        details.set_file_format(file_format)?;
        details.set_url(url)?;
        Ok(details)
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn access_type(&self) -> AccessType {
        self.access_type
    }

    pub fn file_format(&self) -> &str {
        &self.file_format
    }

    pub fn file_size(&self) -> &str {
        &self.file_size
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn requires_authentication(&self) -> bool {
        self.requires_authentication
    }

    pub fn simultaneous_users(&self) -> i32 {
        self.simultaneous_users
    }

    pub fn system_requirements(&self) -> &str {
        &self.system_requirements
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.content_type = content_type;
    }

    pub fn set_access_type(&mut self, access_type: AccessType) {
        self.access_type = access_type;
    }

    // stored trimmed and upper-cased, e.g. "pdf " becomes "PDF"
    pub fn set_file_format(&mut self, file_format: &str) -> LibraryResult<()> {
        if is_blank(file_format) {
            return Err(LibraryError::validation("file format cannot be empty", Some("fileFormat".to_string())));
        }
        self.file_format = file_format.trim().to_uppercase();
        Ok(())
    }

    pub fn set_file_size(&mut self, file_size: &str) {
        self.file_size = file_size.trim().to_string();
    }

    pub fn set_url(&mut self, url: &str) -> LibraryResult<()> {
        let url = url.trim();
        if self.access_type == AccessType::Online && !url.is_empty() && !is_valid_url(url) {
            return Err(LibraryError::validation(format!("invalid URL for online content {}", url).as_str(),
                                                Some("url".to_string())));
        }
        self.url = url.to_string();
        Ok(())
    }

    pub fn set_platform(&mut self, platform: &str) {
        self.platform = platform.trim().to_string();
    }

    pub fn set_requires_authentication(&mut self, requires_authentication: bool) {
        self.requires_authentication = requires_authentication;
    }

    pub fn set_simultaneous_users(&mut self, simultaneous_users: i32) -> LibraryResult<()> {
        if simultaneous_users < 1 {
            return Err(LibraryError::validation("simultaneous users must be at least 1",
                                                Some("simultaneousUsers".to_string())));
        }
        self.simultaneous_users = simultaneous_users;
        Ok(())
    }

    pub fn set_system_requirements(&mut self, system_requirements: &str) {
        self.system_requirements = system_requirements.trim().to_string();
    }

    pub fn can_accommodate_simultaneous_loans(&self) -> bool {
        self.simultaneous_users > 1 || self.access_type == AccessType::Online
    }

    pub fn is_valid_digital_content(&self) -> bool {
        if self.file_format.is_empty() || self.simultaneous_users < 1 {
            return false;
        }
        self.access_type != AccessType::Online || is_valid_url(&self.url)
    }
}
