use crate::Recipe;
use serde::{Deserialize, Serialize};

/// Version written into every store document.
pub(crate) const CURRENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// On-disk layout of a file-backed store, as read.
#[derive(Debug, Deserialize)]
pub(crate) struct StoreDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// On-disk layout of a file-backed store, as written.
#[derive(Debug, Serialize)]
pub(crate) struct StoreDocumentRef<'a> {
    pub version: u32,
    pub recipes: &'a [Recipe],
}

impl<'a> StoreDocumentRef<'a> {
    pub(crate) fn new(recipes: &'a [Recipe]) -> Self {
        StoreDocumentRef {
            version: CURRENT_VERSION,
            recipes,
        }
    }
}
