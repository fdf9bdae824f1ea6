//! Category Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type CategoryId = Thing;

/// Product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<CategoryId>,
    pub name: String,
    /// URL slug, unique across categories
    pub slug: String,
}

impl Category {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: None,
            name,
            slug,
        }
    }

    /// Public URL of the category page
    pub fn url(&self) -> String {
        format!("/category/{}", self.slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}
