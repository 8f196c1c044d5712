use super::recipe::{Recipe, RecipeError};

/// The content of a submitted new-recipe or edit-recipe form.
///
/// Values are kept exactly as typed. Trimming, tag normalization and title
/// validation happen when the draft is applied to a [`Recipe`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    /// Comma-separated tag input
    pub tags: String,
    /// Image data already downscaled and compressed by the caller
    pub image: Option<Vec<u8>>,
}

impl RecipeDraft {
    pub fn new(title: impl Into<String>) -> Self {
        RecipeDraft {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = ingredients.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    /// Pre-fills an edit form from an existing recipe.
    ///
    /// The tag input is the stored canonical string; it normalizes back to
    /// the same tags when the form is submitted unchanged.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        RecipeDraft {
            title: recipe.title().to_string(),
            ingredients: recipe.ingredients().unwrap_or_default().to_string(),
            instructions: recipe.instructions().unwrap_or_default().to_string(),
            tags: recipe.tags_raw().unwrap_or_default().to_string(),
            image: recipe.image().map(<[u8]>::to_vec),
        }
    }

    /// Returns true if the form can be submitted.
    pub fn is_submittable(&self) -> bool {
        self.validated_title().is_ok()
    }

    pub(crate) fn validated_title(&self) -> Result<&str, RecipeError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(RecipeError::EmptyTitle);
        }
        Ok(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_builder() {
        let draft = RecipeDraft::new("Pancakes")
            .with_ingredients("flour, milk")
            .with_instructions("Mix and fry")
            .with_tags("breakfast")
            .with_image(vec![0xff, 0xd8]);

        assert_eq!(draft.title, "Pancakes");
        assert_eq!(draft.ingredients, "flour, milk");
        assert_eq!(draft.instructions, "Mix and fry");
        assert_eq!(draft.tags, "breakfast");
        assert_eq!(draft.image, Some(vec![0xff, 0xd8]));
    }

    #[test]
    fn test_draft_submittable() {
        assert!(RecipeDraft::new(" Soup ").is_submittable());
        assert!(!RecipeDraft::new("   ").is_submittable());
        assert!(!RecipeDraft::default().is_submittable());
    }

    #[test]
    fn test_validated_title_is_trimmed() {
        let draft = RecipeDraft::new("\n Borscht \t");
        assert_eq!(draft.validated_title().unwrap(), "Borscht");
    }

    #[test]
    fn test_draft_from_recipe() {
        let recipe = Recipe::create(
            RecipeDraft::new("Cake")
                .with_ingredients("cocoa")
                .with_tags("Sweet, dessert")
                .with_image(vec![7]),
        )
        .unwrap();

        let draft = RecipeDraft::from_recipe(&recipe);
        assert_eq!(draft.title, "Cake");
        assert_eq!(draft.ingredients, "cocoa");
        assert_eq!(draft.instructions, "");
        assert_eq!(draft.tags, ", dessert, sweet,");
        assert_eq!(draft.image, Some(vec![7]));
    }
}
