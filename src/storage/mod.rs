
mod error;
mod file;
mod memory;

pub use self::error::{Error, Result};
pub use self::file::FileStorage;
pub use self::memory::MemoryStorage;

// String-keyed, string-valued storage. Every write replaces the whole entry.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
