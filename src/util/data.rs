//! Read option values from data files.
//!
//! The format is chosen from the file extension: `.json`, `.toml`, `.yaml`
//! or `.yml`.

pub mod json;
pub mod toml;
pub mod yaml;

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum DataError {
    /// JSON error.
    #[error(transparent)]
    Json(#[from] json::JsonError),
    /// TOML error.
    #[error(transparent)]
    Toml(#[from] self::toml::TomlError),
    /// YAML error.
    #[error(transparent)]
    Yaml(#[from] yaml::YamlError),
    /// Unknown file extension.
    #[error("unsupported data file extension {0:?}")]
    Extension(Option<String>),
}

/// Read value from a data file, according to its extension.
pub fn from_file<T>(path: impl AsRef<Path>) -> Result<T, DataError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(json::from_file(path)?),
        Some("toml") => Ok(self::toml::from_file(path)?),
        Some("yaml" | "yml") => Ok(yaml::from_file(path)?),
        extension => Err(DataError::Extension(extension.map(str::to_string))),
    }
}
