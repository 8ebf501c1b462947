use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::validation::{is_blank, is_valid_doi};

// ArticleDetails holds the journal publication part of a catalog item.
#[derive(Debug, PartialEq, Clone)]
pub struct ArticleDetails {
    journal: String,
    volume: i32,
    issue: i32,
    page_range: String,
    doi: String,
    abstract_text: String,
    keywords: Vec<String>,
    research_field: String,
}

impl ArticleDetails {
    pub fn new(journal: &str) -> LibraryResult<Self> {
        let mut details = ArticleDetails {
            journal: String::new(),
            volume: 0,
            issue: 0,
            page_range: String::new(),
            doi: String::new(),
            abstract_text: String::new(),
            keywords: vec![],
            research_field: String::new(),
        };
        details.set_journal(journal)?;
        Ok(details)
    }

    pub fn journal(&self) -> &str {
        &self.journal
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn issue(&self) -> i32 {
        self.issue
    }

    pub fn page_range(&self) -> &str {
        &self.page_range
    }

    pub fn doi(&self) -> &str {
        &self.doi
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn research_field(&self) -> &str {
        &self.research_field
    }

    pub fn set_journal(&mut self, journal: &str) -> LibraryResult<()> {
        if is_blank(journal) {
            return Err(LibraryError::validation("journal cannot be empty", Some("journal".to_string())));
        }
        self.journal = journal.trim().to_string();
        Ok(())
    }

    pub fn set_volume(&mut self, volume: i32) -> LibraryResult<()> {
        if volume < 0 {
            return Err(LibraryError::validation("volume cannot be negative", Some("volume".to_string())));
        }
        self.volume = volume;
        Ok(())
    }

    pub fn set_issue(&mut self, issue: i32) -> LibraryResult<()> {
        if issue < 0 {
            return Err(LibraryError::validation("issue cannot be negative", Some("issue".to_string())));
        }
        self.issue = issue;
        Ok(())
    }

    pub fn set_page_range(&mut self, page_range: &str) {
        self.page_range = page_range.to_string();
    }

    pub fn set_doi(&mut self, doi: &str) -> LibraryResult<()> {
        if !doi.is_empty() && !is_valid_doi(doi) {
            return Err(LibraryError::validation(format!("invalid DOI format {}", doi).as_str(),
                                                Some("doi".to_string())));
        }
        self.doi = doi.to_string();
        Ok(())
    }

    pub fn set_abstract_text(&mut self, abstract_text: &str) {
        self.abstract_text = abstract_text.to_string();
    }

    pub fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords.clear();
        for keyword in keywords {
            self.add_keyword(&keyword);
        }
    }

    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        before != self.keywords.len()
    }

    pub fn set_research_field(&mut self, research_field: &str) {
        self.research_field = research_field.to_string();
    }

    // volume/issue suffix such as " (Vol. 3, No. 2)", empty when neither is known
    pub(crate) fn volume_issue_label(&self) -> String {
        match (self.volume > 0, self.issue > 0) {
            (true, true) => format!(" (Vol. {}, No. {})", self.volume, self.issue),
            (true, false) => format!(" (Vol. {})", self.volume),
            (false, true) => format!(" (No. {})", self.issue),
            (false, false) => String::new(),
        }
    }

    pub fn citation(&self, author: &str, title: &str, publication_year: i32) -> String {
        let mut citation = format!("{}. \"{}.\" {}", author, title, self.journal);
        if self.volume > 0 {
            citation.push_str(format!(" {}", self.volume).as_str());
            if self.issue > 0 {
                citation.push_str(format!(".{}", self.issue).as_str());
            }
        }
        citation.push_str(format!(" ({})", publication_year).as_str());
        if !self.page_range.is_empty() {
            citation.push_str(format!(": {}", self.page_range).as_str());
        }
        if !self.doi.is_empty() {
            citation.push_str(format!(". DOI: {}", self.doi).as_str());
        }
        citation
    }
}
