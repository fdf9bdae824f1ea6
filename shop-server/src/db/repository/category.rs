//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let category: Option<Category> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(category)
    }

    /// Find category by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        // Slug is unique
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category with slug '{}' already exists",
                data.slug
            )));
        }

        let category = Category::new(data.name, data.slug);

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        // Check duplicate slug if changing
        if let Some(ref new_slug) = data.slug {
            if new_slug != &existing.slug && self.find_by_slug(new_slug).await?.is_some() {
                return Err(RepoError::Duplicate(format!(
                    "Category with slug '{}' already exists",
                    new_slug
                )));
            }
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
        }

        let update_data = CategoryUpdateDb {
            name: data.name,
            slug: data.slug,
        };

        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category. Refused while products still reference it.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let cat_thing = make_thing(TABLE, pure_id);

        for table in ["notebook", "smartphone"] {
            let mut result = self
                .base
                .db()
                .query(format!(
                    "SELECT count() FROM {} WHERE category = $cat GROUP ALL",
                    table
                ))
                .bind(("cat", cat_thing.clone()))
                .await?;
            let count: Option<i64> = result.take((0, "count"))?;
            if count.unwrap_or(0) > 0 {
                return Err(RepoError::Validation(
                    "Cannot delete category with products".to_string(),
                ));
            }
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", cat_thing))
            .await?;

        Ok(true)
    }
}
