//! Store configuration.
//!
//! Configuration is resolved once when the application starts and handed to
//! [`RecipeStore::open`](crate::RecipeStore::open). Nothing in the crate
//! reads environment variables or global state afterwards.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Where recipes are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreLocation {
    /// Nothing is written to disk; contents are lost when the store is dropped.
    #[default]
    InMemory,
    /// A JSON document at the given path.
    File(Utf8PathBuf),
}

/// Configuration for a [`RecipeStore`](crate::RecipeStore).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreConfig {
    pub location: StoreLocation,
    /// Write indented JSON instead of the compact form
    pub pretty: bool,
}

/// Shape of the YAML configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    path: Option<Utf8PathBuf>,
    #[serde(default)]
    pretty: bool,
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn at_path(path: impl Into<Utf8PathBuf>) -> Self {
        StoreConfig {
            location: StoreLocation::File(path.into()),
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the backing file, if any.
    pub fn path(&self) -> Option<&Utf8Path> {
        match &self.location {
            StoreLocation::InMemory => None,
            StoreLocation::File(path) => Some(path),
        }
    }

    /// Parses a YAML configuration.
    ///
    /// A missing `path` key selects an in-memory store.
    ///
    /// ```
    /// use cookbook_store::StoreConfig;
    ///
    /// let config = StoreConfig::from_yaml_str("path: recipes.json\npretty: true").unwrap();
    /// assert_eq!(config.path().unwrap().as_str(), "recipes.json");
    /// assert!(config.pretty);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        let location = match file.path {
            Some(path) => StoreLocation::File(path),
            None => StoreLocation::InMemory,
        };
        Ok(StoreConfig {
            location,
            pretty: file.pretty,
        })
    }

    /// Reads and parses a YAML configuration file.
    ///
    /// A relative `path` in the file is resolved against the directory the
    /// configuration file lives in.
    pub fn from_yaml_file(config_path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml_str(&content)?;

        if let StoreLocation::File(path) = &mut config.location {
            if path.is_relative() {
                let base = config_path.parent().unwrap_or(Utf8Path::new(""));
                *path = base.join(&*path);
            }
        }
        Ok(config)
    }
}
