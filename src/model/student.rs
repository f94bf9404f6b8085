
use serde::{Deserialize, Serialize};

// Only `validate` builds these, so every record in a roster is known good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub(super) name: String,
    #[serde(rename = "sid")]
    pub(super) student_id: String,
    pub(super) email: String,
    pub(super) contact: String,
}

impl StudentRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }
}

// Unchecked field values as submitted by a user, or as read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    pub name: String,
    #[serde(rename = "sid")]
    pub student_id: String,
    pub email: String,
    pub contact: String,
}

impl StudentForm {
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            email: email.into(),
            contact: contact.into(),
        }
    }
}

impl From<&StudentRecord> for StudentForm {
    fn from(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            student_id: record.student_id.clone(),
            email: record.email.clone(),
            contact: record.contact.clone(),
        }
    }
}
