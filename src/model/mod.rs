
mod student;
mod validation;

pub use self::student::{StudentForm, StudentRecord};
pub use self::validation::{validate, ValidationError, ValidationRule};
