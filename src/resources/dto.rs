use std::convert::TryFrom;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, ResourceCategory, ResourceStatus};
use crate::resources::domain::article::ArticleDetails;
use crate::resources::domain::book::BookDetails;
use crate::resources::domain::digital::{AccessType, ContentType, DigitalContentDetails};
use crate::resources::domain::model::{ResourceDetails, ResourceEntity};
use crate::resources::domain::thesis::{DegreeLevel, ThesisDetails};
use crate::utils::date::serializer;

pub const RESOURCE_TYPES: [&str; 4] = ["Book", "Article", "Thesis", "Digital Content"];

// ResourceDto is the persisted shape of a catalog item, discriminated by its "type" field.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub category: ResourceCategory,
    pub status: ResourceStatus,
    #[serde(with = "serializer")]
    pub date_added: NaiveDateTime,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub details: ResourceDetailsDto,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceDetailsDto {
    Book(BookDto),
    Article(ArticleDto),
    Thesis(ThesisDto),
    #[serde(rename = "Digital Content")]
    DigitalContent(DigitalContentDto),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(default)]
    pub isbn: String,
    pub publisher: String,
    #[serde(default)]
    pub page_count: i32,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub is_hardcover: bool,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub journal: String,
    #[serde(default)]
    pub volume: i32,
    #[serde(default)]
    pub issue: i32,
    #[serde(default)]
    pub page_range: String,
    #[serde(default)]
    pub doi: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub research_field: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisDto {
    pub supervisor: String,
    pub university: String,
    pub department: String,
    pub degree_level: DegreeLevel,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalContentDto {
    pub content_type: ContentType,
    pub access_type: AccessType,
    pub file_format: String,
    #[serde(default)]
    pub file_size: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub requires_authentication: bool,
    #[serde(default = "default_simultaneous_users")]
    pub simultaneous_users: i32,
    #[serde(default)]
    pub system_requirements: String,
}

fn default_language() -> String {
    "English".to_string()
}

fn default_simultaneous_users() -> i32 {
    1
}

impl From<&ResourceDetails> for ResourceDetailsDto {
    fn from(other: &ResourceDetails) -> ResourceDetailsDto {
        match other {
            ResourceDetails::Book(book) => ResourceDetailsDto::Book(BookDto {
                isbn: book.isbn().to_string(),
                publisher: book.publisher().to_string(),
                page_count: book.page_count(),
                language: book.language().to_string(),
                genre: book.genre().to_string(),
                is_hardcover: book.is_hardcover(),
            }),
            ResourceDetails::Article(article) => ResourceDetailsDto::Article(ArticleDto {
                journal: article.journal().to_string(),
                volume: article.volume(),
                issue: article.issue(),
                page_range: article.page_range().to_string(),
                doi: article.doi().to_string(),
                abstract_text: article.abstract_text().to_string(),
                keywords: article.keywords().to_vec(),
                research_field: article.research_field().to_string(),
            }),
            ResourceDetails::Thesis(thesis) => ResourceDetailsDto::Thesis(ThesisDto {
                supervisor: thesis.supervisor().to_string(),
                university: thesis.university().to_string(),
                department: thesis.department().to_string(),
                degree_level: thesis.degree_level(),
                keywords: thesis.keywords().to_string(),
            }),
            ResourceDetails::DigitalContent(digital) => ResourceDetailsDto::DigitalContent(DigitalContentDto {
                content_type: digital.content_type(),
                access_type: digital.access_type(),
                file_format: digital.file_format().to_string(),
                file_size: digital.file_size().to_string(),
                url: digital.url().to_string(),
                platform: digital.platform().to_string(),
                requires_authentication: digital.requires_authentication(),
                simultaneous_users: digital.simultaneous_users(),
                system_requirements: digital.system_requirements().to_string(),
            }),
        }
    }
}

impl TryFrom<&ResourceDetailsDto> for ResourceDetails {
    type Error = LibraryError;

    fn try_from(other: &ResourceDetailsDto) -> Result<Self, Self::Error> {
        match other {
            ResourceDetailsDto::Book(dto) => {
                let mut book = BookDetails::new(&dto.isbn, &dto.publisher)?;
                book.set_page_count(dto.page_count)?;
                book.set_language(&dto.language);
                book.set_genre(&dto.genre);
                book.set_hardcover(dto.is_hardcover);
                Ok(ResourceDetails::Book(book))
            }
            ResourceDetailsDto::Article(dto) => {
                let mut article = ArticleDetails::new(&dto.journal)?;
                article.set_volume(dto.volume)?;
                article.set_issue(dto.issue)?;
                article.set_page_range(&dto.page_range);
                article.set_doi(&dto.doi)?;
                article.set_abstract_text(&dto.abstract_text);
                article.set_keywords(dto.keywords.clone());
                article.set_research_field(&dto.research_field);
                Ok(ResourceDetails::Article(article))
            }
            ResourceDetailsDto::Thesis(dto) => {
                let mut thesis = ThesisDetails::new(&dto.supervisor, &dto.university, &dto.department, dto.degree_level)?;
                thesis.set_keywords(&dto.keywords);
                Ok(ResourceDetails::Thesis(thesis))
            }
            ResourceDetailsDto::DigitalContent(dto) => {
                let mut digital = DigitalContentDetails::new(dto.content_type, dto.access_type, &dto.file_format, &dto.url)?;
                digital.set_file_size(&dto.file_size);
                digital.set_platform(&dto.platform);
                digital.set_requires_authentication(dto.requires_authentication);
                digital.set_simultaneous_users(dto.simultaneous_users)?;
                digital.set_system_requirements(&dto.system_requirements);
                Ok(ResourceDetails::DigitalContent(digital))
            }
        }
    }
}

impl From<&ResourceEntity> for ResourceDto {
    fn from(other: &ResourceEntity) -> ResourceDto {
        ResourceDto {
            id: other.id(),
            title: other.title().to_string(),
            author: other.author().to_string(),
            publication_year: other.publication_year(),
            category: other.category(),
            status: other.status(),
            date_added: other.date_added(),
            description: other.description().to_string(),
            details: ResourceDetailsDto::from(other.details()),
        }
    }
}

impl TryFrom<&ResourceDto> for ResourceEntity {
    type Error = LibraryError;

    fn try_from(other: &ResourceDto) -> Result<Self, Self::Error> {
        let details = ResourceDetails::try_from(&other.details)?;
        let mut resource = ResourceEntity::new(&other.id, &other.title, &other.author,
                                               other.publication_year, details, other.date_added)?;
        resource.set_category(other.category);
        resource.set_status(other.status);
        resource.set_description(&other.description);
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;
    use chrono::NaiveDate;
    use serde_json::json;
    use chrono::NaiveDateTime;
    use crate::core::domain::Identifiable;
    use crate::core::library::{ResourceCategory, ResourceStatus};
    use crate::resources::domain::article::ArticleDetails;
    use crate::resources::domain::book::BookDetails;
    use crate::resources::domain::digital::{AccessType, ContentType, DigitalContentDetails};
    use crate::resources::domain::model::{ResourceDetails, ResourceEntity};
    use crate::resources::domain::thesis::{DegreeLevel, ThesisDetails};
    use crate::resources::dto::{ResourceDetailsDto, ResourceDto};

    fn added() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1).and_then(|d| d.and_hms_opt(10, 0, 0)).expect("should build date")
    }

    fn through_json(resource: &ResourceEntity) -> ResourceEntity {
        let json = serde_json::to_string(&ResourceDto::from(resource)).expect("should encode");
        let dto: ResourceDto = serde_json::from_str(&json).expect("should decode");
        ResourceEntity::try_from(&dto).expect("should convert")
    }

    fn assert_same_resource(expected: &ResourceEntity, actual: &ResourceEntity) {
        assert_eq!(expected.id(), actual.id());
        assert_eq!(expected.title(), actual.title());
        assert_eq!(expected.author(), actual.author());
        assert_eq!(expected.publication_year(), actual.publication_year());
        assert_eq!(expected.category(), actual.category());
        assert_eq!(expected.status(), actual.status());
        assert_eq!(expected.date_added(), actual.date_added());
        assert_eq!(expected.description(), actual.description());
        assert_eq!(expected.details(), actual.details());
    }

    #[test]
    fn test_should_keep_book_fields_through_json() {
        let mut details = BookDetails::new("978-0-13-235088-4", "Prentice Hall").expect("should build details");
        details.set_page_count(464).expect("should set pages");
        details.set_language("French");
        details.set_genre("Software");
        details.set_hardcover(true);
        let mut resource = ResourceEntity::new("B1", "Clean Code", "Robert Martin", 2008,
                                               ResourceDetails::Book(details), added()).expect("should build resource");
        resource.set_status(ResourceStatus::Maintenance);
        resource.set_description("binding repair");
        assert_same_resource(&resource, &through_json(&resource));
    }

    #[test]
    fn test_should_keep_article_fields_through_json() {
        let mut details = ArticleDetails::new("Nature").expect("should build details");
        details.set_volume(521).expect("should set volume");
        details.set_issue(7553).expect("should set issue");
        details.set_page_range("436-444");
        details.set_doi("10.1038/nature14539").expect("should set doi");
        details.set_abstract_text("Deep learning allows computational models to learn representations.");
        details.set_keywords(vec!["deep learning".to_string(), "neural networks".to_string()]);
        details.set_research_field("Machine Learning");
        let resource = ResourceEntity::new("A1", "Deep learning", "Y. LeCun", 2015,
                                           ResourceDetails::Article(details), added()).expect("should build resource");
        let decoded = through_json(&resource);
        assert_same_resource(&resource, &decoded);
        match decoded.details() {
            ResourceDetails::Article(article) => {
                assert_eq!("10.1038/nature14539", article.doi());
                assert_eq!(vec!["deep learning".to_string(), "neural networks".to_string()], article.keywords().to_vec());
            }
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_should_keep_digital_content_fields_through_json() {
        let mut details = DigitalContentDetails::new(ContentType::Database, AccessType::Online, "html",
                                                     "https://ieeexplore.ieee.org").expect("should build details");
        details.set_platform("IEEE Xplore");
        details.set_requires_authentication(true);
        details.set_simultaneous_users(25).expect("should set users");
        details.set_system_requirements("modern browser");
        let resource = ResourceEntity::new("D2", "IEEE Xplore", "IEEE", 2000,
                                           ResourceDetails::DigitalContent(details), added()).expect("should build resource");
        let decoded = through_json(&resource);
        assert_same_resource(&resource, &decoded);
        match decoded.details() {
            ResourceDetails::DigitalContent(digital) => {
                assert_eq!(ContentType::Database, digital.content_type());
                assert_eq!(AccessType::Online, digital.access_type());
                assert_eq!("https://ieeexplore.ieee.org", digital.url());
            }
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_should_decode_book_json() {
        let value = json!({
            "id": "B1",
            "type": "Book",
            "title": "Clean Code",
            "author": "Robert Martin",
            "publicationYear": 2008,
            "category": "Book",
            "status": "Borrowed",
            "dateAdded": "2025-03-01T10:00:00",
            "description": "",
            "isbn": "9780132350884",
            "publisher": "Prentice Hall",
            "pageCount": 464,
            "language": "English",
            "genre": "Software",
            "isHardcover": false
        });
        let dto: ResourceDto = serde_json::from_value(value).expect("should decode");
        let resource = ResourceEntity::try_from(&dto).expect("should convert");
        assert_eq!("Book", resource.resource_type());
        assert_eq!(ResourceStatus::Borrowed, resource.status());
        match resource.details() {
            ResourceDetails::Book(book) => assert_eq!(464, book.page_count()),
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_should_write_type_discriminator() {
        let added = NaiveDate::from_ymd_opt(2025, 3, 1).and_then(|d| d.and_hms_opt(10, 0, 0)).expect("should build date");
        let details = DigitalContentDetails::new(ContentType::AudioBook, AccessType::Streaming, "mp3", "").expect("should build details");
        let resource = ResourceEntity::new("D1", "Dune", "Frank Herbert", 1965,
                                           ResourceDetails::DigitalContent(details), added).expect("should build resource");
        let value = serde_json::to_value(ResourceDto::from(&resource)).expect("should encode");
        assert_eq!("Digital Content", value["type"]);
        assert_eq!("Digital Content", value["category"]);
        assert_eq!("Audio Book", value["contentType"]);
        assert_eq!("2025-03-01T10:00:00", value["dateAdded"]);
        assert_eq!(1, value["simultaneousUsers"]);
    }

    #[test]
    fn test_should_keep_thesis_fields_through_json() {
        let added = NaiveDate::from_ymd_opt(2024, 9, 1).and_then(|d| d.and_hms_opt(8, 30, 0)).expect("should build date");
        let mut thesis = ThesisDetails::new("Dr. Benali", "ENSIA", "AI", DegreeLevel::PhD).expect("should build details");
        thesis.set_keywords("graphs, learning");
        let mut resource = ResourceEntity::new("T1", "Graph Learning", "S. Amrani", 2024,
                                               ResourceDetails::Thesis(thesis), added).expect("should build resource");
        resource.set_description("doctoral thesis");
        let json = serde_json::to_string(&ResourceDto::from(&resource)).expect("should encode");
        let dto: ResourceDto = serde_json::from_str(&json).expect("should decode");
        assert!(matches!(dto.details, ResourceDetailsDto::Thesis(_)));
        let decoded = ResourceEntity::try_from(&dto).expect("should convert");
        assert_eq!(resource.details(), decoded.details());
        assert_eq!("doctoral thesis", decoded.description());
        assert_eq!(ResourceCategory::Thesis, decoded.category());
        assert_eq!(added, decoded.date_added());
    }

    #[test]
    fn test_should_reject_invalid_entry() {
        let value = json!({
            "id": "A1", "type": "Article", "title": "Paper", "author": "X",
            "publicationYear": 2020, "category": "Article", "status": "Available",
            "dateAdded": "2025-03-01T10:00:00", "journal": "Nature", "doi": "bad doi"
        });
        let dto: ResourceDto = serde_json::from_value(value).expect("should decode");
        assert!(ResourceEntity::try_from(&dto).is_err());
    }

    #[test]
    fn test_should_fail_on_unknown_type() {
        let value = json!({
            "id": "M1", "type": "Map", "title": "Atlas", "author": "X",
            "publicationYear": 2020, "category": "Other", "status": "Available",
            "dateAdded": "2025-03-01T10:00:00"
        });
        assert!(serde_json::from_value::<ResourceDto>(value).is_err());
    }
}
