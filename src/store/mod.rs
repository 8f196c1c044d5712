//! Recipe persistence.
//!
//! [`RecipeStore`] is an explicit handle created once at startup from a
//! [`StoreConfig`] and passed to whatever needs it. Opening a store only
//! loads data; bringing legacy tag strings into canonical form is a separate,
//! idempotent step ([`RecipeStore::migrate_tags`]).

use crate::config::StoreConfig;
use crate::search::{self, RecipeFilter};
use crate::{Recipe, RecipeDraft, RecipeError, RecipeId};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use std::fs;
use thiserror::Error;

mod model;
mod preview;

use model::{StoreDocument, StoreDocumentRef, CURRENT_VERSION};

/// Errors that can occur when reading or changing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access recipe store: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to encode or decode recipe store: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    #[error("Unsupported store version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid recipe: {0}")]
    RecipeError(#[from] RecipeError),
}

/// Handle to the recipe collection.
///
/// Every successful mutation is written through to the backing file
/// immediately. If writing fails, the in-memory collection is rolled back so
/// that it never diverges from what is on disk.
#[derive(Debug)]
pub struct RecipeStore {
    config: StoreConfig,
    /// Recipes in insertion order
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Opens a store.
    ///
    /// File-backed stores read their document if it exists and start empty
    /// otherwise; the file is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or parsed, or was
    /// written by a newer version of the store.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let recipes = match config.path() {
            Some(path) if path.exists() => load_document(path)?,
            _ => Vec::new(),
        };

        tracing::debug!(
            count = recipes.len(),
            location = ?config.location,
            "opened recipe store"
        );

        Ok(RecipeStore { config, recipes })
    }

    /// Creates an empty store that is never written to disk.
    pub fn in_memory() -> Self {
        RecipeStore {
            config: StoreConfig::in_memory(),
            recipes: Vec::new(),
        }
    }

    /// Creates an in-memory store filled with a handful of sample recipes.
    pub fn preview() -> Self {
        let now = Utc::now();
        let recipes = preview::sample_drafts()
            .into_iter()
            .filter_map(|draft| Recipe::create_at(draft, now).ok())
            .collect();

        RecipeStore {
            config: StoreConfig::in_memory(),
            recipes,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id() == id)
    }

    /// Returns all recipes, most recently updated first.
    ///
    /// Recipes updated at the same instant keep their insertion order.
    pub fn recipes(&self) -> Vec<&Recipe> {
        let mut sorted: Vec<&Recipe> = self.recipes.iter().collect();
        sorted.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        sorted
    }

    /// Returns the recipes accepted by `filter`, most recently updated first.
    pub fn fetch(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        search::apply(self.recipes(), filter)
    }

    /// Adds a recipe built from a submitted form and returns its id.
    pub fn create(&mut self, draft: RecipeDraft) -> Result<RecipeId, StoreError> {
        self.create_at(draft, Utc::now())
    }

    pub(crate) fn create_at(
        &mut self,
        draft: RecipeDraft,
        now: DateTime<Utc>,
    ) -> Result<RecipeId, StoreError> {
        let recipe = Recipe::create_at(draft, now)?;
        let id = recipe.id();
        self.recipes.push(recipe);

        if let Err(e) = self.save() {
            self.recipes.pop();
            return Err(e);
        }

        tracing::debug!(%id, "created recipe");
        Ok(id)
    }

    /// Replaces the content of an existing recipe with a submitted form.
    pub fn update(&mut self, id: RecipeId, draft: RecipeDraft) -> Result<(), StoreError> {
        self.update_at(id, draft, Utc::now())
    }

    pub(crate) fn update_at(
        &mut self,
        id: RecipeId,
        draft: RecipeDraft,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let previous = self.recipes[index].clone();
        self.recipes[index].apply_edit_at(draft, now)?;

        if let Err(e) = self.save() {
            self.recipes[index] = previous;
            return Err(e);
        }

        tracing::debug!(%id, "updated recipe");
        Ok(())
    }

    /// Removes a recipe.
    pub fn delete(&mut self, id: RecipeId) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let removed = self.recipes.remove(index);

        if let Err(e) = self.save() {
            self.recipes.insert(index, removed);
            return Err(e);
        }

        tracing::debug!(%id, "deleted recipe");
        Ok(())
    }

    /// Rewrites legacy tag strings into canonical form.
    ///
    /// Safe to call on every startup: recipes that are already canonical are
    /// left alone, and nothing is written unless at least one recipe changed.
    /// Returns the number of recipes that were migrated.
    pub fn migrate_tags(&mut self) -> Result<usize, StoreError> {
        let mut previous = Vec::new();
        for (index, recipe) in self.recipes.iter_mut().enumerate() {
            let before = recipe.clone();
            if recipe.migrate_tags() {
                previous.push((index, before));
            }
        }

        let migrated = previous.len();
        if migrated == 0 {
            return Ok(0);
        }

        if let Err(e) = self.save() {
            for (index, before) in previous {
                self.recipes[index] = before;
            }
            return Err(e);
        }

        tracing::info!(count = migrated, "migrated recipes to canonical tag format");
        Ok(migrated)
    }

    /// Writes the collection to the backing file.
    ///
    /// The document is written to a temporary file next to the target and
    /// then renamed over it. In-memory stores do nothing.
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = self.config.path() else {
            return Ok(());
        };

        let document = StoreDocumentRef::new(&self.recipes);
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp_path = temp_path_for(path);
        fs::write(&temp_path, json)?;
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(count = self.recipes.len(), %path, "saved recipe store");
        Ok(())
    }

    fn position(&self, id: RecipeId) -> Result<usize, StoreError> {
        self.recipes
            .iter()
            .position(|recipe| recipe.id() == id)
            .ok_or(StoreError::NotFound(id))
    }
}

fn load_document(path: &Utf8Path) -> Result<Vec<Recipe>, StoreError> {
    let content = fs::read_to_string(path)?;
    let document: StoreDocument = serde_json::from_str(&content)?;

    if document.version > CURRENT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: document.version,
            supported: CURRENT_VERSION,
        });
    }
    Ok(document.recipes)
}

fn temp_path_for(path: &Utf8Path) -> Utf8PathBuf {
    let file_name = path.file_name().unwrap_or("recipes");
    path.with_file_name(format!(".{file_name}.tmp"))
}
