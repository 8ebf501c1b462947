use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::validation::is_blank;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DegreeLevel {
    Bachelor,
    Master,
    PhD,
    Postdoc,
}

impl From<String> for DegreeLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Bachelor's" => DegreeLevel::Bachelor,
            "Master's" => DegreeLevel::Master,
            "PhD" => DegreeLevel::PhD,
            "Postdoc" => DegreeLevel::Postdoc,
            _ => DegreeLevel::Bachelor,
        }
    }
}

impl From<DegreeLevel> for String {
    fn from(level: DegreeLevel) -> Self {
        level.to_string()
    }
}

impl Display for DegreeLevel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DegreeLevel::Bachelor => write!(f, "Bachelor's"),
            DegreeLevel::Master => write!(f, "Master's"),
            DegreeLevel::PhD => write!(f, "PhD"),
            DegreeLevel::Postdoc => write!(f, "Postdoc"),
        }
    }
}

// ThesisDetails holds the academic part of a catalog item.
#[derive(Debug, PartialEq, Clone)]
pub struct ThesisDetails {
    supervisor: String,
    university: String,
    department: String,
    degree_level: DegreeLevel,
    keywords: String,
}

impl ThesisDetails {
    pub fn new(supervisor: &str, university: &str, department: &str, degree_level: DegreeLevel) -> LibraryResult<Self> {
        let mut details = ThesisDetails {
            supervisor: String::new(),
            university: String::new(),
            department: String::new(),
            degree_level,
            keywords: String::new(),
        };
        details.set_supervisor(supervisor)?;
        details.set_university(university)?;
        details.set_department(department)?;
        Ok(details)
    }

    pub fn supervisor(&self) -> &str {
        &self.supervisor
    }

    pub fn university(&self) -> &str {
        &self.university
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn degree_level(&self) -> DegreeLevel {
        self.degree_level
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn set_supervisor(&mut self, supervisor: &str) -> LibraryResult<()> {
        self.supervisor = required(supervisor, "supervisor")?;
        Ok(())
    }

    pub fn set_university(&mut self, university: &str) -> LibraryResult<()> {
        self.university = required(university, "university")?;
        Ok(())
    }

    pub fn set_department(&mut self, department: &str) -> LibraryResult<()> {
        self.department = required(department, "department")?;
        Ok(())
    }

    pub fn set_degree_level(&mut self, degree_level: DegreeLevel) {
        self.degree_level = degree_level;
    }

    pub fn set_keywords(&mut self, keywords: &str) {
        self.keywords = keywords.trim().to_string();
    }

    pub fn is_valid_thesis(&self) -> bool {
        !is_blank(&self.supervisor) && !is_blank(&self.university) && !is_blank(&self.department)
    }
}

fn required(value: &str, field: &str) -> LibraryResult<String> {
    if is_blank(value) {
        return Err(LibraryError::validation(format!("{} cannot be empty", field).as_str(),
                                            Some(field.to_string())));
    }
    Ok(value.trim().to_string())
}
