
use core::fmt;

use crate::{model::ValidationError, storage};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No student at index {} (roster has {})", self.index, self.len)
    }
}

impl std::error::Error for IndexError {}

#[derive(Debug)]
pub enum Error {
    Validation(ValidationError),
    Index(IndexError),
    Encode(serde_json::Error),
    PersistenceWrite(storage::Error),
    ConfigInvalid { name: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Index(e) => write!(f, "{e}"),
            Self::Encode(e) => write!(f, "Unable to encode roster: {e}"),
            Self::PersistenceWrite(e) => write!(f, "Unable to save roster: {e}"),
            Self::ConfigInvalid { name, value } => {
                write!(f, "Invalid value for {name}: \"{value}\"")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Index(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::PersistenceWrite(e) => Some(e),
            Self::ConfigInvalid { .. } => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<IndexError> for Error {
    fn from(value: IndexError) -> Self {
        Self::Index(value)
    }
}

impl From<storage::Error> for Error {
    fn from(value: storage::Error) -> Self {
        Self::PersistenceWrite(value)
    }
}
