use chrono::{Datelike, NaiveDateTime};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, ResourceCategory, ResourceStatus};
use crate::resources::domain::article::ArticleDetails;
use crate::resources::domain::book::BookDetails;
use crate::resources::domain::digital::DigitalContentDetails;
use crate::resources::domain::thesis::ThesisDetails;
use crate::utils::validation::is_blank;

pub const MIN_PUBLICATION_YEAR: i32 = 1000;

// ResourceDetails is the closed set of catalog item kinds.
#[derive(Debug, PartialEq, Clone)]
pub enum ResourceDetails {
    Book(BookDetails),
    Article(ArticleDetails),
    Thesis(ThesisDetails),
    DigitalContent(DigitalContentDetails),
}

impl ResourceDetails {
    pub fn type_name(&self) -> &'static str {
        match self {
            ResourceDetails::Book(_) => "Book",
            ResourceDetails::Article(_) => "Article",
            ResourceDetails::Thesis(_) => "Thesis",
            ResourceDetails::DigitalContent(_) => "Digital Content",
        }
    }

    pub fn default_category(&self) -> ResourceCategory {
        match self {
            ResourceDetails::Book(_) => ResourceCategory::Book,
            ResourceDetails::Article(_) => ResourceCategory::Article,
            ResourceDetails::Thesis(_) => ResourceCategory::Thesis,
            ResourceDetails::DigitalContent(_) => ResourceCategory::DigitalContent,
        }
    }
}

// ResourceEntity abstracts a catalog item that patrons can borrow or reserve.
#[derive(Debug, Clone)]
pub struct ResourceEntity {
    id: String,
    title: String,
    author: String,
    publication_year: i32,
    category: ResourceCategory,
    status: ResourceStatus,
    date_added: NaiveDateTime,
    description: String,
    details: ResourceDetails,
}

impl ResourceEntity {
    pub fn new(id: &str, title: &str, author: &str, publication_year: i32,
               details: ResourceDetails, date_added: NaiveDateTime) -> LibraryResult<Self> {
        if is_blank(id) {
            return Err(LibraryError::validation("resource id cannot be empty", Some("id".to_string())));
        }
        let mut resource = ResourceEntity {
            id: id.trim().to_string(),
            title: String::new(),
            author: String::new(),
            publication_year: MIN_PUBLICATION_YEAR,
            category: details.default_category(),
            status: ResourceStatus::Available,
            date_added,
            description: String::new(),
            details,
        };
        resource.set_title(title)?;
        resource.set_author(author)?;
        // nothing is catalogued before it is published
        resource.set_publication_year(publication_year, date_added.year())?;
        Ok(resource)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn category(&self) -> ResourceCategory {
        self.category
    }

    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    pub fn date_added(&self) -> NaiveDateTime {
        self.date_added
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &ResourceDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut ResourceDetails {
        &mut self.details
    }

    pub fn resource_type(&self) -> &'static str {
        self.details.type_name()
    }

    pub fn is_available(&self) -> bool {
        self.status == ResourceStatus::Available
    }

    pub fn set_title(&mut self, title: &str) -> LibraryResult<()> {
        if is_blank(title) {
            return Err(LibraryError::validation("title cannot be empty", Some("title".to_string())));
        }
        self.title = title.trim().to_string();
        Ok(())
    }

    pub fn set_author(&mut self, author: &str) -> LibraryResult<()> {
        if is_blank(author) {
            return Err(LibraryError::validation("author cannot be empty", Some("author".to_string())));
        }
        self.author = author.trim().to_string();
        Ok(())
    }

    pub fn validate_publication_year(publication_year: i32, current_year: i32) -> LibraryResult<()> {
        if !(MIN_PUBLICATION_YEAR..=current_year).contains(&publication_year) {
            return Err(LibraryError::validation(
                format!("publication year {} must be between {} and {}",
                        publication_year, MIN_PUBLICATION_YEAR, current_year).as_str(),
                Some("publicationYear".to_string())));
        }
        Ok(())
    }

    pub fn set_publication_year(&mut self, publication_year: i32, current_year: i32) -> LibraryResult<()> {
        ResourceEntity::validate_publication_year(publication_year, current_year)?;
        self.publication_year = publication_year;
        Ok(())
    }

    pub fn set_category(&mut self, category: ResourceCategory) {
        self.category = category;
    }

    pub fn set_status(&mut self, status: ResourceStatus) {
        self.status = status;
    }

    pub fn set_date_added(&mut self, date_added: NaiveDateTime) {
        self.date_added = date_added;
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    // case-insensitive substring match over title, author and description
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) ||
            self.author.to_lowercase().contains(&query) ||
            self.description.to_lowercase().contains(&query)
    }

    pub fn citation(&self) -> Option<String> {
        match &self.details {
            ResourceDetails::Article(article) => {
                Some(article.citation(&self.author, &self.title, self.publication_year))
            }
            _ => None,
        }
    }

    pub fn formatted_details(&self) -> String {
        match &self.details {
            ResourceDetails::Article(article) => {
                format!("{} by {} - {}{} - {}", self.title, self.author, article.journal(),
                        article.volume_issue_label(), self.status)
            }
            ResourceDetails::Thesis(thesis) => {
                format!("{} by {} ({}, {} {}) - {}", self.title, self.author, thesis.degree_level(),
                        thesis.university(), self.publication_year, self.status)
            }
            ResourceDetails::DigitalContent(digital) => {
                format!("{} by {} [{}, {}] - {}", self.title, self.author, digital.content_type(),
                        digital.file_format(), self.status)
            }
            ResourceDetails::Book(_) => {
                format!("{} by {} ({}) - {}", self.title, self.author, self.publication_year, self.status)
            }
        }
    }

    pub fn details_text(&self) -> String {
        let mut lines = vec![
            format!("Title: {}", self.title),
            format!("Author: {}", self.author),
            format!("Type: {}", self.resource_type()),
            format!("Publication Year: {}", self.publication_year),
        ];
        match &self.details {
            ResourceDetails::Book(book) => {
                lines.push(format!("ISBN: {}", book.isbn()));
                lines.push(format!("Publisher: {}", book.publisher()));
                lines.push(format!("Pages: {}", book.page_count()));
                lines.push(format!("Language: {}", book.language()));
                lines.push(format!("Genre: {}", book.genre()));
                lines.push(format!("Format: {}", book.format()));
            }
            ResourceDetails::Article(article) => {
                lines.push(format!("Journal: {}", article.journal()));
                if article.volume() > 0 {
                    lines.push(format!("Volume: {}", article.volume()));
                }
                if article.issue() > 0 {
                    lines.push(format!("Issue: {}", article.issue()));
                }
                if !article.page_range().is_empty() {
                    lines.push(format!("Pages: {}", article.page_range()));
                }
                if !article.doi().is_empty() {
                    lines.push(format!("DOI: {}", article.doi()));
                }
                if !article.research_field().is_empty() {
                    lines.push(format!("Research Field: {}", article.research_field()));
                }
                if !article.keywords().is_empty() {
                    lines.push(format!("Keywords: {}", article.keywords().join(", ")));
                }
            }
            ResourceDetails::Thesis(thesis) => {
                lines.push(format!("Supervisor: {}", thesis.supervisor()));
                lines.push(format!("University: {}", thesis.university()));
                lines.push(format!("Department: {}", thesis.department()));
                lines.push(format!("Degree Level: {}", thesis.degree_level()));
                if !thesis.keywords().is_empty() {
                    lines.push(format!("Keywords: {}", thesis.keywords()));
                }
            }
            ResourceDetails::DigitalContent(digital) => {
                lines.push(format!("Content Type: {}", digital.content_type()));
                lines.push(format!("Access Type: {}", digital.access_type()));
                lines.push(format!("File Format: {}", digital.file_format()));
                if !digital.file_size().is_empty() {
                    lines.push(format!("File Size: {}", digital.file_size()));
                }
                if !digital.url().is_empty() {
                    lines.push(format!("URL: {}", digital.url()));
                }
                if !digital.platform().is_empty() {
                    lines.push(format!("Platform: {}", digital.platform()));
                }
                lines.push(format!("Simultaneous Users: {}", digital.simultaneous_users()));
            }
        }
        lines.push(format!("Status: {}", self.status));
        if !self.description.is_empty() {
            lines.push(format!("Description: {}", self.description));
        }
        lines.join("\n")
    }
}

impl Identifiable for ResourceEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

impl PartialEq for ResourceEntity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::domain::Identifiable;
    use crate::core::library::{LibraryError, ResourceCategory, ResourceStatus};
    use crate::resources::domain::article::ArticleDetails;
    use crate::resources::domain::book::BookDetails;
    use crate::resources::domain::model::{ResourceDetails, ResourceEntity};

    fn book(id: &str, title: &str) -> ResourceEntity {
        let added = NaiveDate::from_ymd_opt(2025, 3, 1).and_then(|d| d.and_hms_opt(10, 0, 0)).expect("should build date");
        let details = BookDetails::new("978-0-13-235088-4", "Prentice Hall").expect("should build details");
        ResourceEntity::new(id, title, "Robert Martin", 2008, ResourceDetails::Book(details), added).expect("should build resource")
    }

    #[test]
    fn test_should_build_resource() {
        let resource = book("B1", " Clean Code ");
        assert_eq!("B1", resource.id().as_str());
        assert_eq!("Clean Code", resource.title());
        assert_eq!(ResourceCategory::Book, resource.category());
        assert_eq!(ResourceStatus::Available, resource.status());
        assert_eq!("Book", resource.resource_type());
        assert!(resource.is_available());
    }

    #[test]
    fn test_should_reject_missing_fields_and_bad_year() {
        let details = ResourceDetails::Article(ArticleDetails::new("Nature").expect("should build details"));
        let added = NaiveDate::from_ymd_opt(2025, 3, 1).and_then(|d| d.and_hms_opt(10, 0, 0)).expect("should build date");
        assert!(matches!(ResourceEntity::new("", "t", "a", 2000, details.clone(), added), Err(LibraryError::Validation { .. })));
        assert!(matches!(ResourceEntity::new("A1", " ", "a", 2000, details.clone(), added), Err(LibraryError::Validation { .. })));
        assert!(matches!(ResourceEntity::new("A1", "t", "", 2000, details.clone(), added), Err(LibraryError::Validation { .. })));
        assert!(matches!(ResourceEntity::new("A1", "t", "a", 999, details.clone(), added), Err(LibraryError::Validation { .. })));
        assert!(matches!(ResourceEntity::new("A1", "t", "a", 9999, details.clone(), added), Err(LibraryError::Validation { .. })));
        assert!(matches!(ResourceEntity::new("A1", "t", "a", 2026, details, added), Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_bound_publication_year_by_given_year() {
        let mut resource = book("B1", "Clean Code");
        assert!(resource.set_publication_year(2030, 2025).is_err());
        assert_eq!(2008, resource.publication_year());
        resource.set_publication_year(2030, 2030).expect("should accept year");
        assert_eq!(2030, resource.publication_year());
        assert!(resource.set_publication_year(999, 2030).is_err());
    }

    #[test]
    fn test_should_match_query_case_insensitive() {
        let mut resource = book("B1", "Clean Code");
        resource.set_description("A handbook of agile software craftsmanship");
        assert!(resource.matches("clean"));
        assert!(resource.matches("MARTIN"));
        assert!(resource.matches("Agile"));
        assert!(!resource.matches("refactoring"));
    }

    #[test]
    fn test_should_compare_by_id() {
        let a = book("B1", "Alpha");
        let b = book("B1", "Beta");
        let c = book("B2", "Gamma");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_should_describe_resource() {
        let resource = book("B1", "Clean Code");
        assert_eq!("Clean Code by Robert Martin (2008) - Available", resource.formatted_details().as_str());
        let text = resource.details_text();
        assert!(text.contains("Publisher: Prentice Hall"));
        assert!(text.contains("Format: Paperback"));
        assert_eq!(None, resource.citation());
    }
}
