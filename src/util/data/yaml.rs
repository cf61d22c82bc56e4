//! Read values from YAML data.

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum YamlError {
    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Parse error.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Read value from a YAML data file.
pub fn from_file<T>(path: impl AsRef<Path>) -> Result<T, YamlError>
where
    T: DeserializeOwned,
{
    from_str(std::fs::read_to_string(path)?)
}

/// Read value from a YAML data string.
pub fn from_str<T>(s: impl AsRef<str>) -> Result<T, YamlError>
where
    T: DeserializeOwned,
{
    Ok(serde_yaml::from_str(s.as_ref())?)
}
