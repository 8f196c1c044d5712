pub mod config;
pub mod ffi;
pub mod model;
pub mod search;
pub mod store;
pub mod tags;

pub use config::{ConfigError, StoreConfig, StoreLocation};
pub use model::*;
pub use search::{apply, build_filter, RecipeFilter};
pub use store::{RecipeStore, StoreError};

uniffi::setup_scaffolding!();
