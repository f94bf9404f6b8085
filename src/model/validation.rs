
use core::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::{StudentForm, StudentRecord};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("name regex"));
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("id regex"));
static CONTACT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,}$").expect("contact regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr)]
pub enum ValidationRule {
    EmptyField,
    InvalidName,
    InvalidId,
    InvalidContact,
}

impl ValidationRule {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyField => "All fields required",
            Self::InvalidName => "Name only letters",
            Self::InvalidId => "ID only numbers",
            Self::InvalidContact => "Contact min 10 digits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub rule: ValidationRule,
}

impl From<ValidationRule> for ValidationError {
    fn from(rule: ValidationRule) -> Self {
        Self { rule }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rule.message())
    }
}

impl std::error::Error for ValidationError {}

// Whitespace plus the byte order mark.
fn trim(field: &str) -> &str {
    field.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

// Rules are checked in a fixed order and the first failure wins.
pub fn validate(form: &StudentForm) -> Result<StudentRecord, ValidationError> {
    let name = trim(&form.name);
    let student_id = trim(&form.student_id);
    let email = trim(&form.email);
    let contact = trim(&form.contact);

    if [name, student_id, email, contact].iter().any(|field| field.is_empty()) {
        return Err(ValidationRule::EmptyField.into());
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(ValidationRule::InvalidName.into());
    }
    if !ID_PATTERN.is_match(student_id) {
        return Err(ValidationRule::InvalidId.into());
    }
    if !CONTACT_PATTERN.is_match(contact) {
        return Err(ValidationRule::InvalidContact.into());
    }

    Ok(StudentRecord {
        name: name.to_string(),
        student_id: student_id.to_string(),
        email: email.to_string(),
        contact: contact.to_string(),
    })
}
