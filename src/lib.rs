
pub mod config;
mod error;
pub mod model;
pub mod render;
pub mod shell;
pub mod storage;
mod store;

pub use self::config::Config;
pub use self::error::{Error, IndexError, Result};
pub use self::model::{StudentForm, StudentRecord, ValidationError, ValidationRule};
pub use self::store::{RosterStore, DEFAULT_KEY};
