use super::fold;
use crate::Recipe;

/// The tag half of a [`RecipeFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum TagCondition {
    /// No tag query was given
    #[default]
    Any,
    /// Folded `", <tag>,"` pattern the stored tag string must contain
    Pattern(String),
    /// The query folded to nothing, so no stored tag can equal it
    Never,
}

/// A predicate over recipes built from the title search and tag filter
/// inputs.
///
/// Query strings are folded once at construction so that testing a recipe
/// only costs one pass over its title and tag string. The default filter
/// accepts every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Folded title substring, if a title query was given
    title: Option<String>,
    tag: TagCondition,
}

impl RecipeFilter {
    pub(crate) fn new(title: Option<String>, tag: TagCondition) -> Self {
        Self { title, tag }
    }

    /// Returns true if the filter accepts every recipe.
    pub fn is_unfiltered(&self) -> bool {
        self.title.is_none() && self.tag == TagCondition::Any
    }

    /// Tests a single recipe. All present conditions must hold.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(title) = &self.title {
            if !fold(recipe.title()).contains(title.as_str()) {
                return false;
            }
        }

        match &self.tag {
            TagCondition::Any => true,
            TagCondition::Never => false,
            TagCondition::Pattern(pattern) => recipe
                .tags_raw()
                .is_some_and(|raw| fold(raw).contains(pattern.as_str())),
        }
    }
}
