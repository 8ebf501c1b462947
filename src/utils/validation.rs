use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex");
    static ref ISBN: Regex = Regex::new(r"^\d{9}[\dX]$|^\d{13}$").expect("valid isbn regex");
    static ref DOI: Regex = Regex::new(r"^10\.\d+/\S+$").expect("valid doi regex");
    static ref URL: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#]+[^\s]*$").expect("valid url regex");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

// ISBN-10 or ISBN-13 once hyphens and spaces are stripped.
pub fn is_valid_isbn(isbn: &str) -> bool {
    let clean: String = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();
    ISBN.is_match(&clean)
}

pub fn is_valid_doi(doi: &str) -> bool {
    DOI.is_match(doi)
}

pub fn is_valid_url(url: &str) -> bool {
    URL.is_match(url)
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
