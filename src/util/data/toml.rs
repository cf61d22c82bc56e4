//! Read values from TOML data.

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum TomlError {
    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Parse error.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Read value from a TOML data file.
pub fn from_file<T, P>(path: P) -> Result<T, TomlError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let s = std::fs::read_to_string(path)?;
    from_str(s)
}

/// Read value from a TOML data string.
pub fn from_str<T, S>(s: S) -> Result<T, TomlError>
where
    T: DeserializeOwned,
    S: AsRef<str>,
{
    let s = s.as_ref();
    Ok(toml::from_str(s)?)
}
