
use crate::{storage, Error, Result, DEFAULT_KEY};
use std::{env, path::PathBuf};

pub const DEFAULT_DATA_DIR: &str = ".roster";

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub DATA_DIR: PathBuf,
    pub STORAGE_KEY: String,
}

impl Config {
    pub fn load_from_env() -> Result<Config> {
        Self::load(None, None)
    }

    // Explicit values win; the environment is only consulted for what is missing.
    pub fn load(data_dir: Option<PathBuf>, storage_key: Option<String>) -> Result<Config> {
        let data_dir = match data_dir {
            Some(dir) if dir.as_os_str().is_empty() => {
                return Err(Error::ConfigInvalid { name: "--data-dir", value: String::new() });
            }
            Some(dir) => dir,
            None => PathBuf::from(get_env_or("ROSTER_DATA_DIR", DEFAULT_DATA_DIR)?),
        };

        let (name, storage_key) = match storage_key {
            Some(key) => ("--key", key),
            None => ("ROSTER_STORAGE_KEY", get_env_or("ROSTER_STORAGE_KEY", DEFAULT_KEY)?),
        };
        if !storage::is_valid_key(&storage_key) {
            return Err(Error::ConfigInvalid { name, value: storage_key });
        }

        Ok(Config {
            DATA_DIR: data_dir,
            STORAGE_KEY: storage_key,
        })
    }
}

fn get_env_or(name: &'static str, default: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(Error::ConfigInvalid { name, value }),
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(env::VarError::NotUnicode(raw)) => Err(Error::ConfigInvalid {
            name,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}
