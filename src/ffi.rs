//! UniFFI bindings for the iOS and Android apps.
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Ids cross the boundary as strings and timestamps as Unix milliseconds.

use crate::config::{ConfigError, StoreConfig};
use crate::model::{Recipe, RecipeDraft, RecipeError, RecipeId};
use crate::search::build_filter;
use crate::store::{RecipeStore, StoreError};
use crate::tags;
use camino::Utf8Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum CookbookError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

impl From<RecipeError> for CookbookError {
    fn from(e: RecipeError) -> Self {
        CookbookError::InvalidInput {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for CookbookError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::IoError(e) => CookbookError::IoError {
                message: e.to_string(),
            },
            StoreError::NotFound(id) => CookbookError::NotFound {
                message: id.to_string(),
            },
            StoreError::RecipeError(e) => e.into(),
            StoreError::SerializationError(_) | StoreError::UnsupportedVersion { .. } => {
                CookbookError::StorageError {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<ConfigError> for CookbookError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::IoError(e) => CookbookError::IoError {
                message: e.to_string(),
            },
            ConfigError::YamlError(e) => CookbookError::InvalidInput {
                message: e.to_string(),
            },
        }
    }
}

fn parse_id(id: &str) -> Result<RecipeId, CookbookError> {
    id.parse().map_err(|e: uuid::Error| CookbookError::InvalidInput {
        message: format!("Invalid recipe id '{id}': {e}"),
    })
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub title: String,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    /// Decoded tags, in no particular order
    pub tags: Vec<String>,
    /// Canonical tag string as stored
    pub tags_raw: Option<String>,
    pub image: Option<Vec<u8>>,
    /// Creation time in Unix milliseconds
    pub created_at: i64,
    /// Last update time in Unix milliseconds
    pub updated_at: i64,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id().to_string(),
            title: r.title().to_string(),
            ingredients: r.ingredients().map(|s| s.to_string()),
            instructions: r.instructions().map(|s| s.to_string()),
            tags: r.tags(),
            tags_raw: r.tags_raw().map(|s| s.to_string()),
            image: r.image().map(|bytes| bytes.to_vec()),
            created_at: r.created_at().timestamp_millis(),
            updated_at: r.updated_at().timestamp_millis(),
        }
    }
}

/// FFI-safe representation of a submitted recipe form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    /// Comma-separated tag input
    pub tags: String,
    /// Image data already downscaled and compressed by the app
    pub image: Option<Vec<u8>>,
}

impl From<FfiRecipeDraft> for RecipeDraft {
    fn from(d: FfiRecipeDraft) -> Self {
        RecipeDraft {
            title: d.title,
            ingredients: d.ingredients,
            instructions: d.instructions,
            tags: d.tags,
            image: d.image,
        }
    }
}

/// FFI-safe handle to a recipe store.
///
/// The store is guarded by a mutex so the handle can be shared with the
/// foreign side.
#[derive(uniffi::Object)]
pub struct FfiRecipeStore {
    inner: Mutex<RecipeStore>,
}

impl FfiRecipeStore {
    fn new(store: RecipeStore) -> Self {
        FfiRecipeStore {
            inner: Mutex::new(store),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RecipeStore>, CookbookError> {
        self.inner.lock().map_err(|_| CookbookError::StorageError {
            message: "recipe store lock poisoned".to_string(),
        })
    }
}

#[uniffi::export]
impl FfiRecipeStore {
    /// Adds a recipe and returns its id.
    pub fn create_recipe(&self, draft: FfiRecipeDraft) -> Result<String, CookbookError> {
        let id = self.lock()?.create(draft.into())?;
        Ok(id.to_string())
    }

    /// Replaces the content of an existing recipe.
    pub fn update_recipe(&self, id: String, draft: FfiRecipeDraft) -> Result<(), CookbookError> {
        let id = parse_id(&id)?;
        self.lock()?.update(id, draft.into())?;
        Ok(())
    }

    /// Deletes a recipe.
    pub fn delete_recipe(&self, id: String) -> Result<(), CookbookError> {
        let id = parse_id(&id)?;
        self.lock()?.delete(id)?;
        Ok(())
    }

    /// Returns a recipe by id, or `None` if it does not exist.
    pub fn get_recipe(&self, id: String) -> Result<Option<FfiRecipe>, CookbookError> {
        let id = parse_id(&id)?;
        Ok(self.lock()?.get(id).map(FfiRecipe::from))
    }

    /// Lists recipes matching the title search and tag filter, most
    /// recently updated first. Empty strings disable the matching condition.
    pub fn list_recipes(
        &self,
        title_query: String,
        tag_query: String,
    ) -> Result<Vec<FfiRecipe>, CookbookError> {
        let filter = build_filter(&title_query, &tag_query);
        let store = self.lock()?;
        Ok(store
            .fetch(&filter)
            .into_iter()
            .map(FfiRecipe::from)
            .collect())
    }

    /// Rewrites legacy tag strings into canonical form and returns how many
    /// recipes changed.
    pub fn migrate_tags(&self) -> Result<u64, CookbookError> {
        let migrated = self.lock()?.migrate_tags()?;
        Ok(migrated as u64)
    }

    /// Returns the number of stored recipes.
    pub fn count(&self) -> Result<u64, CookbookError> {
        Ok(self.lock()?.len() as u64)
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Normalizes comma-separated tag input (trimmed, lowercased, deduplicated).
#[uniffi::export]
pub fn normalize_tags(input: String) -> Vec<String> {
    tags::normalize(&input)
}

/// Decodes a stored tag string.
#[uniffi::export]
pub fn decode_tags(raw: Option<String>) -> Vec<String> {
    tags::decode(raw.as_deref())
}

/// Encodes tags into the canonical stored form.
#[uniffi::export]
pub fn encode_tags(tags: Vec<String>) -> String {
    tags::encode(&tags)
}

/// Brings a stored tag string into canonical form.
#[uniffi::export]
pub fn migrate_tags_raw(raw: String) -> String {
    tags::migrate(&raw)
}

/// Opens a recipe store.
///
/// # Arguments
/// * `path` - JSON file to keep recipes in, or `None` for an in-memory store
#[uniffi::export]
pub fn open_store(path: Option<String>) -> Result<Arc<FfiRecipeStore>, CookbookError> {
    let config = match path {
        Some(path) => StoreConfig::at_path(path),
        None => StoreConfig::in_memory(),
    };
    let store = RecipeStore::open(config)?;
    Ok(Arc::new(FfiRecipeStore::new(store)))
}

/// Opens a recipe store described by a YAML configuration file.
#[uniffi::export]
pub fn open_store_with_config(config_path: String) -> Result<Arc<FfiRecipeStore>, CookbookError> {
    let config = StoreConfig::from_yaml_file(Utf8Path::new(&config_path))?;
    let store = RecipeStore::open(config)?;
    Ok(Arc::new(FfiRecipeStore::new(store)))
}

/// Returns an in-memory store filled with sample recipes.
#[uniffi::export]
pub fn preview_store() -> Arc<FfiRecipeStore> {
    Arc::new(FfiRecipeStore::new(RecipeStore::preview()))
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
