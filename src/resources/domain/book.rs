use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::validation::{is_blank, is_valid_isbn};

// BookDetails holds the printed-book specific part of a catalog item.
#[derive(Debug, PartialEq, Clone)]
pub struct BookDetails {
    isbn: String,
    publisher: String,
    page_count: i32,
    language: String,
    genre: String,
    is_hardcover: bool,
}

impl BookDetails {
    pub fn new(isbn: &str, publisher: &str) -> LibraryResult<Self> {
        let mut details = BookDetails {
            isbn: String::new(),
            publisher: String::new(),
            page_count: 0,
            language: "English".to_string(),
            genre: String::new(),
            is_hardcover: false,
        };
        details.set_isbn(isbn)?;
        details.set_publisher(publisher)?;
        Ok(details)
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn page_count(&self) -> i32 {
        self.page_count
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn is_hardcover(&self) -> bool {
        self.is_hardcover
    }

    // An empty ISBN is allowed for items catalogued without one.
    pub fn set_isbn(&mut self, isbn: &str) -> LibraryResult<()> {
        if !isbn.is_empty() && !is_valid_isbn(isbn) {
            return Err(LibraryError::validation(format!("invalid ISBN format {}", isbn).as_str(),
                                                Some("isbn".to_string())));
        }
        self.isbn = isbn.to_string();
        Ok(())
    }

    pub fn set_publisher(&mut self, publisher: &str) -> LibraryResult<()> {
        if is_blank(publisher) {
            return Err(LibraryError::validation("publisher cannot be empty", Some("publisher".to_string())));
        }
        self.publisher = publisher.trim().to_string();
        Ok(())
    }

    pub fn set_page_count(&mut self, page_count: i32) -> LibraryResult<()> {
        if page_count < 0 {
            return Err(LibraryError::validation("page count cannot be negative", Some("pageCount".to_string())));
        }
        self.page_count = page_count;
        Ok(())
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    pub fn set_genre(&mut self, genre: &str) {
        self.genre = genre.to_string();
    }

    pub fn set_hardcover(&mut self, is_hardcover: bool) {
        self.is_hardcover = is_hardcover;
    }

    pub fn format(&self) -> &'static str {
        if self.is_hardcover { "Hardcover" } else { "Paperback" }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;
    use crate::resources::domain::book::BookDetails;

    #[test]
    fn test_should_build_book_with_defaults() {
        let book = BookDetails::new("978-0-13-235088-4", "Prentice Hall").expect("should build book");
        assert_eq!("English", book.language());
        assert_eq!(0, book.page_count());
        assert_eq!("Paperback", book.format());
    }

    #[test]
    fn test_should_allow_empty_isbn() {
        let book = BookDetails::new("", "Self published").expect("should build book");
        assert_eq!("", book.isbn());
    }

    #[test]
    fn test_should_reject_invalid_fields() {
        assert!(matches!(BookDetails::new("12-34", "Publisher"), Err(LibraryError::Validation { .. })));
        assert!(matches!(BookDetails::new("", "  "), Err(LibraryError::Validation { .. })));
        let mut book = BookDetails::new("", "Publisher").expect("should build book");
        assert!(book.set_page_count(-1).is_err());
        book.set_page_count(320).expect("should set pages");
        book.set_hardcover(true);
        assert_eq!(320, book.page_count());
        assert_eq!("Hardcover", book.format());
    }
}
