mod draft;
mod recipe;

pub use draft::RecipeDraft;
pub use recipe::{Recipe, RecipeError, RecipeId};
