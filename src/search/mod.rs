//! Filtered recipe queries.
//!
//! The list screen narrows recipes with two inputs: a title search and a
//! single-tag filter. [`build_filter`] turns them into a [`RecipeFilter`]
//! and [`apply`] narrows an already-sorted recipe sequence with it.
//! Matching is plain substring containment; there is no ranking.

use crate::tags::{CANONICAL_PREFIX, CANONICAL_SUFFIX};
use crate::Recipe;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

mod model;

pub use model::RecipeFilter;
use model::TagCondition;

/// Builds the filter for the given title search and tag filter.
///
/// # Arguments
///
/// * `title_query` - Substring the title must contain, as typed. Matching
///   ignores case and diacritics. An empty string disables the condition.
/// * `tag_query` - A single tag the recipe must carry exactly. An empty
///   string disables the condition.
///
/// # Examples
///
/// ```
/// use cookbook_store::{build_filter, Recipe, RecipeDraft};
///
/// let recipe = Recipe::create(RecipeDraft::new("Crème Brûlée").with_tags("Dessert")).unwrap();
/// assert!(build_filter("creme", "dessert").matches(&recipe));
/// assert!(!build_filter("", "dess").matches(&recipe));
/// ```
pub fn build_filter(title_query: &str, tag_query: &str) -> RecipeFilter {
    let title = (!title_query.is_empty()).then(|| fold(title_query));
    let tag = if tag_query.is_empty() {
        TagCondition::Any
    } else {
        // A query of nothing but combining marks folds away entirely
        match fold(tag_query) {
            folded if folded.is_empty() => TagCondition::Never,
            folded => {
                TagCondition::Pattern(format!("{CANONICAL_PREFIX}{folded}{CANONICAL_SUFFIX}"))
            }
        }
    };

    RecipeFilter::new(title, tag)
}

/// Returns the recipes accepted by `filter`, keeping their input order.
///
/// The input is expected to be sorted already (most recently updated
/// first, as the store returns it); it is not re-sorted here.
pub fn apply<'a, I>(recipes: I, filter: &RecipeFilter) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    if filter.is_unfiltered() {
        return recipes.into_iter().collect();
    }
    recipes
        .into_iter()
        .filter(|recipe| filter.matches(recipe))
        .collect()
}

/// Folds text for case- and diacritic-insensitive comparison.
///
/// The text is decomposed, combining marks are dropped and the remainder is
/// lowercased, so `"Crème"` and `"CREME"` fold to the same string.
pub(crate) fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecipeDraft;

    fn recipe(title: &str, tags: &str) -> Recipe {
        Recipe::create(RecipeDraft::new(title).with_tags(tags)).unwrap()
    }

    fn titles<'a>(recipes: &[&'a Recipe]) -> Vec<&'a str> {
        recipes.iter().map(|r| r.title()).collect()
    }

    fn sample_recipes() -> Vec<Recipe> {
        vec![
            recipe("Pasta Carbonara", "italian, pasta"),
            recipe("Salad", "italian"),
            recipe("Category Cake", "category"),
            recipe("Cat Biscuits", "cat, treats"),
        ]
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("Crème Brûlée"), "creme brulee");
        assert_eq!(fold("PASTA"), "pasta");
        assert_eq!(fold("Ёлка"), "елка");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let recipes = sample_recipes();
        let filter = build_filter("", "");
        assert!(filter.is_unfiltered());
        assert_eq!(filter, RecipeFilter::default());

        let results = apply(&recipes, &filter);
        assert_eq!(
            titles(&results),
            vec!["Pasta Carbonara", "Salad", "Category Cake", "Cat Biscuits"]
        );
    }

    #[test]
    fn test_title_and_tag_combined() {
        let recipes = sample_recipes();
        let results = apply(&recipes, &build_filter("Pasta", "italian"));
        assert_eq!(titles(&results), vec!["Pasta Carbonara"]);
    }

    #[test]
    fn test_title_query_case_and_diacritics() {
        let recipes = vec![recipe("Crème Brûlée", ""), recipe("Creme Caramel", "")];
        let results = apply(&recipes, &build_filter("CRÈME", ""));
        assert_eq!(titles(&results), vec!["Crème Brûlée", "Creme Caramel"]);

        let results = apply(&recipes, &build_filter("brulee", ""));
        assert_eq!(titles(&results), vec!["Crème Brûlée"]);
    }

    #[test]
    fn test_title_query_is_not_trimmed() {
        let recipes = vec![recipe("Pasta", ""), recipe("Pasta Bake", "")];
        let results = apply(&recipes, &build_filter("pasta ", ""));
        assert_eq!(titles(&results), vec!["Pasta Bake"]);
    }

    #[test]
    fn test_tag_query_matches_whole_tags_only() {
        let recipes = sample_recipes();

        let results = apply(&recipes, &build_filter("", "cat"));
        assert_eq!(titles(&results), vec!["Cat Biscuits"]);

        let results = apply(&recipes, &build_filter("", "category"));
        assert_eq!(titles(&results), vec!["Category Cake"]);

        let results = apply(&recipes, &build_filter("", "ital"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_tag_query_is_case_insensitive() {
        let recipes = sample_recipes();
        let results = apply(&recipes, &build_filter("", "ITALIAN"));
        assert_eq!(titles(&results), vec!["Pasta Carbonara", "Salad"]);
    }

    #[test]
    fn test_tag_query_never_matches_untagged() {
        let recipes = vec![recipe("Plain Toast", "")];
        for query in ["a", " ", "toast"] {
            assert!(apply(&recipes, &build_filter("", query)).is_empty());
        }
    }

    #[test]
    fn test_tag_query_folding_to_nothing_matches_nothing() {
        let recipes = vec![recipe("Plain Toast", ""), recipe("Café", "cafe")];
        for query in ["\u{0301}", "\u{0301}\u{0308}"] {
            let filter = build_filter("", query);
            assert!(!filter.is_unfiltered());
            assert!(apply(&recipes, &filter).is_empty());
        }
    }

    #[test]
    fn test_apply_preserves_relative_order() {
        let recipes = vec![
            recipe("Soup B", "soup"),
            recipe("Pie", "dessert"),
            recipe("Soup A", "soup"),
            recipe("Soup C", "soup, quick"),
        ];
        let results = apply(&recipes, &build_filter("", "soup"));
        assert_eq!(titles(&results), vec!["Soup B", "Soup A", "Soup C"]);
    }

    #[test]
    fn test_no_matches() {
        let recipes = sample_recipes();
        assert!(apply(&recipes, &build_filter("nonexistent", "")).is_empty());
        assert!(apply(&recipes, &build_filter("Salad", "pasta")).is_empty());
    }
}
