use super::draft::RecipeDraft;
use crate::tags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Opaque, immutable identifier of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        RecipeId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RecipeId {
    fn from(uuid: Uuid) -> Self {
        RecipeId(uuid)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(RecipeId)
    }
}

/// Errors raised when a submitted recipe form is not acceptable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Recipe title must not be empty")]
    EmptyTitle,
}

/// A single recipe as kept by the store.
///
/// All fields are private. The stored tag string in particular can only be
/// written through [`Recipe::set_tags`], which always produces the
/// canonical form described in [`crate::tags`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    title: String,
    #[serde(default)]
    ingredients: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    tags_raw: Option<String>,
    /// Already-processed image data, stored verbatim
    #[serde(default)]
    image: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Recipe {
    /// Creates a new recipe from a submitted form.
    ///
    /// Title, ingredients and instructions are trimmed, the tag input is
    /// normalized and encoded, and both timestamps are set to now.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::EmptyTitle` if the title is blank.
    pub fn create(draft: RecipeDraft) -> Result<Self, RecipeError> {
        Self::create_at(draft, Utc::now())
    }

    pub(crate) fn create_at(draft: RecipeDraft, now: DateTime<Utc>) -> Result<Self, RecipeError> {
        let title = draft.validated_title()?.to_string();

        let mut recipe = Recipe {
            id: RecipeId::generate(),
            title,
            ingredients: Some(draft.ingredients.trim().to_string()),
            instructions: Some(draft.instructions.trim().to_string()),
            tags_raw: None,
            image: draft.image,
            created_at: now,
            updated_at: now,
        };
        recipe.set_tags(&tags::normalize(&draft.tags));
        Ok(recipe)
    }

    /// Replaces the editable content of the recipe with a submitted form.
    ///
    /// Title, ingredients, instructions, tags and image are all replaced,
    /// and `updated_at` is refreshed. The id and creation time never change.
    /// Nothing is modified if the form is rejected.
    pub fn apply_edit(&mut self, draft: RecipeDraft) -> Result<(), RecipeError> {
        self.apply_edit_at(draft, Utc::now())
    }

    pub(crate) fn apply_edit_at(
        &mut self,
        draft: RecipeDraft,
        now: DateTime<Utc>,
    ) -> Result<(), RecipeError> {
        self.title = draft.validated_title()?.to_string();
        self.ingredients = Some(draft.ingredients.trim().to_string());
        self.instructions = Some(draft.instructions.trim().to_string());
        self.image = draft.image;
        self.set_tags(&tags::normalize(&draft.tags));
        self.touch_at(now);
        Ok(())
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn ingredients(&self) -> Option<&str> {
        self.ingredients.as_deref()
    }

    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// Returns the canonical tag string, if the recipe has ever been tagged.
    pub fn tags_raw(&self) -> Option<&str> {
        self.tags_raw.as_deref()
    }

    /// Returns the recipe's tags. The order is unspecified.
    pub fn tags(&self) -> Vec<String> {
        tags::decode(self.tags_raw.as_deref())
    }

    /// Stores `tags` in canonical form.
    pub fn set_tags<S: AsRef<str>>(&mut self, new_tags: &[S]) {
        self.tags_raw = Some(tags::encode(new_tags));
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Refreshes `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.touch_at(Utc::now());
    }

    pub(crate) fn touch_at(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Rewrites a legacy tag string into canonical form.
    ///
    /// Recipes without tags are left alone. Returns true if the stored
    /// string changed.
    pub fn migrate_tags(&mut self) -> bool {
        let Some(raw) = self.tags_raw.as_deref().filter(|raw| !raw.is_empty()) else {
            return false;
        };

        let migrated = tags::migrate(raw);
        if migrated == raw {
            return false;
        }
        self.tags_raw = Some(migrated);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use indoc::indoc;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_recipe_creation() {
        let draft = RecipeDraft::new("  Pasta Carbonara ")
            .with_ingredients(" pasta, eggs\n")
            .with_instructions("Boil pasta")
            .with_tags("Italian, pasta, ITALIAN");

        let recipe = Recipe::create_at(draft, at(100)).unwrap();
        assert_eq!(recipe.title(), "Pasta Carbonara");
        assert_eq!(recipe.ingredients(), Some("pasta, eggs"));
        assert_eq!(recipe.instructions(), Some("Boil pasta"));
        assert_eq!(recipe.tags_raw(), Some(", italian, pasta,"));
        assert_eq!(recipe.created_at(), at(100));
        assert_eq!(recipe.updated_at(), at(100));
        assert!(recipe.image().is_none());
    }

    #[test]
    fn test_recipe_creation_rejects_blank_title() {
        let result = Recipe::create(RecipeDraft::new(" \n\t"));
        assert_eq!(result.unwrap_err(), RecipeError::EmptyTitle);
    }

    #[test]
    fn test_recipe_creation_without_tags() {
        let recipe = Recipe::create(RecipeDraft::new("Toast")).unwrap();
        assert_eq!(recipe.tags_raw(), Some(", ,"));
        assert!(recipe.tags().is_empty());
    }

    #[test]
    fn test_recipe_ids_are_unique() {
        let first = Recipe::create(RecipeDraft::new("A")).unwrap();
        let second = Recipe::create(RecipeDraft::new("A")).unwrap();
        assert_ne!(first.id(), second.id());
        assert_ne!(first, second);
    }

    #[test]
    fn test_apply_edit_replaces_content() {
        let draft = RecipeDraft::new("Salad")
            .with_tags("green")
            .with_image(vec![1, 2, 3]);
        let mut recipe = Recipe::create_at(draft, at(10)).unwrap();
        let id = recipe.id();

        let edit = RecipeDraft::new("Caesar Salad").with_tags("Light, healthy");
        recipe.apply_edit_at(edit, at(20)).unwrap();

        assert_eq!(recipe.id(), id);
        assert_eq!(recipe.title(), "Caesar Salad");
        assert_eq!(recipe.tags_raw(), Some(", healthy, light,"));
        assert!(recipe.image().is_none());
        assert_eq!(recipe.created_at(), at(10));
        assert_eq!(recipe.updated_at(), at(20));
    }

    #[test]
    fn test_apply_edit_rejected_keeps_recipe() {
        let mut recipe =
            Recipe::create_at(RecipeDraft::new("Soup").with_tags("hot"), at(10)).unwrap();

        let result = recipe.apply_edit_at(RecipeDraft::new("   ").with_tags("cold"), at(20));
        assert_eq!(result.unwrap_err(), RecipeError::EmptyTitle);
        assert_eq!(recipe.title(), "Soup");
        assert_eq!(recipe.tags_raw(), Some(", hot,"));
        assert_eq!(recipe.updated_at(), at(10));
    }

    #[test]
    fn test_edit_form_round_trips_tags() {
        let mut recipe =
            Recipe::create(RecipeDraft::new("Pizza").with_tags("pizza, italian")).unwrap();
        let before = recipe.tags_raw().map(str::to_string);

        let draft = RecipeDraft::from_recipe(&recipe);
        recipe.apply_edit(draft).unwrap();
        assert_eq!(recipe.tags_raw().map(str::to_string), before);
    }

    #[test]
    fn test_migrate_tags_legacy_value() {
        let mut recipe: Recipe = serde_json::from_str(indoc! {r#"
            {
                "id": "4b9f3c1e-8f0a-4c55-9d8e-2a8d6c1f0b11",
                "title": "Borscht",
                "tags_raw": "Soup,Traditional, soup",
                "created_at": "2025-08-20T10:00:00Z",
                "updated_at": "2025-08-20T10:00:00Z"
            }"#})
        .unwrap();

        assert!(recipe.migrate_tags());
        assert_eq!(recipe.tags_raw(), Some(", soup, traditional,"));
        assert!(!recipe.migrate_tags());
    }

    #[test]
    fn test_migrate_tags_skips_untagged() {
        let mut recipe: Recipe = serde_json::from_str(indoc! {r#"
            {
                "id": "4b9f3c1e-8f0a-4c55-9d8e-2a8d6c1f0b12",
                "title": "Plain",
                "tags_raw": "",
                "created_at": "2025-08-20T10:00:00Z",
                "updated_at": "2025-08-20T10:00:00Z"
            }"#})
        .unwrap();

        assert!(!recipe.migrate_tags());
        assert_eq!(recipe.tags_raw(), Some(""));
        assert!(recipe.ingredients().is_none());
    }

    #[test]
    fn test_recipe_id_parsing() {
        let id = RecipeId::generate();
        let parsed: RecipeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<RecipeId>().is_err());
    }
}
