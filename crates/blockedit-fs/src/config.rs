//! Format-agnostic loading of recipe and config files

use crate::{Error, NormalizedPath, Result, io};
use serde::de::DeserializeOwned;
use std::fmt;

/// Serialization format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Case-insensitive; `yml` and `yaml` are both YAML.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Loads serde types from TOML, JSON or YAML files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize a configuration file.
    ///
    /// Unknown extensions are rejected before the file is read.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let extension = path.extension().unwrap_or("");
        let format = Format::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: extension.to_string(),
        })?;

        let bytes = io::read_bytes(path)?;
        let content = String::from_utf8(bytes).map_err(|_| Error::NotUtf8 {
            path: path.to_native(),
        })?;
        self.parse(path, format, &content)
    }

    fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, format: Format, content: &str) -> Result<T> {
        let parsed = match format {
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_native(),
            format,
            message,
        })
    }
}
