//! Catalog Service
//!
//! Storefront read models assembled from the repositories: the
//! latest-products feed for the home page and the category sidebar
//! with per-category product counts.

use crate::db::models::{AnyProduct, Category, ProductKind};
use crate::db::repository::{CategoryRepository, ProductRepository, RepoError, RepoResult};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Products shown per subtype on the home page feed
const LATEST_PER_KIND: usize = 5;

/// One sidebar entry
#[derive(Debug, Clone, Serialize)]
pub struct SidebarCategory {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub url: String,
    /// Number of products in the category, all subtypes combined
    pub count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
    categories: CategoryRepository,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            categories: CategoryRepository::new(db),
        }
    }

    /// Latest products across the requested subtypes.
    ///
    /// Takes the five most recent products of each kind, newest first
    /// within a kind. When `priority` is given, that kind's block is
    /// moved to the front; relative order inside each block survives
    /// the move.
    pub async fn latest_products(
        &self,
        kinds: &[ProductKind],
        priority: Option<ProductKind>,
    ) -> RepoResult<Vec<AnyProduct>> {
        let mut feed = Vec::new();
        for kind in kinds {
            let batch = self.products.find_latest(*kind, LATEST_PER_KIND).await?;
            feed.extend(batch);
        }

        if let Some(priority) = priority {
            // stable sort keeps each kind's newest-first order
            feed.sort_by_key(|p| p.kind() != priority);
        }

        Ok(feed)
    }

    /// Sidebar entries for every category, with combined product counts
    pub async fn sidebar_categories(&self) -> RepoResult<Vec<SidebarCategory>> {
        let categories = self.categories.find_all().await?;

        let mut sidebar = Vec::with_capacity(categories.len());
        for category in categories {
            let entry = self.count_category(category).await?;
            sidebar.push(entry);
        }
        Ok(sidebar)
    }

    async fn count_category(&self, category: Category) -> RepoResult<SidebarCategory> {
        let cat_thing = category
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Category record missing id".to_string()))?;

        let mut count = 0;
        for kind in [ProductKind::Notebook, ProductKind::Smartphone] {
            count += self.products.count_by_category(kind, &cat_thing).await?;
        }

        let url = category.url();
        Ok(SidebarCategory {
            id: Some(cat_thing.to_string()),
            name: category.name,
            slug: category.slug,
            url,
            count,
        })
    }
}
