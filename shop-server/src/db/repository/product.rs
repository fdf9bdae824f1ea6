//! Product Repository
//!
//! One repository for both product subtypes. Every operation is keyed
//! by [`ProductKind`], which names the concrete table; cross-subtype
//! reads return [`AnyProduct`].

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{
    AnyProduct, Notebook, NotebookCreate, NotebookUpdate, ProductKind, ProductRef, Smartphone,
    SmartphoneCreate, SmartphoneUpdate,
};
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn now_millis() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    // =========================================================================
    // Kind-dispatched reads
    // =========================================================================

    /// Find one product by kind and id
    pub async fn find_by_id(&self, kind: ProductKind, id: &str) -> RepoResult<Option<AnyProduct>> {
        let pure_id = strip_table_prefix(kind.table(), id);
        match kind {
            ProductKind::Notebook => {
                let row: Option<Notebook> = self.base.db().select((kind.table(), pure_id)).await?;
                Ok(row.map(AnyProduct::Notebook))
            }
            ProductKind::Smartphone => {
                let row: Option<Smartphone> =
                    self.base.db().select((kind.table(), pure_id)).await?;
                Ok(row.map(AnyProduct::Smartphone))
            }
        }
    }

    /// Resolve a tagged product reference
    pub async fn find_by_ref(&self, product: &ProductRef) -> RepoResult<Option<AnyProduct>> {
        self.find_by_id(product.kind, &product.id.id.to_raw()).await
    }

    /// Find one product by kind and slug
    pub async fn find_by_slug(
        &self,
        kind: ProductKind,
        slug: &str,
    ) -> RepoResult<Option<AnyProduct>> {
        let query = format!("SELECT * FROM {} WHERE slug = $slug LIMIT 1", kind.table());
        let slug_owned = slug.to_string();
        match kind {
            ProductKind::Notebook => {
                let rows: Vec<Notebook> = self
                    .base
                    .db()
                    .query(query)
                    .bind(("slug", slug_owned))
                    .await?
                    .take(0)?;
                Ok(rows.into_iter().next().map(AnyProduct::Notebook))
            }
            ProductKind::Smartphone => {
                let rows: Vec<Smartphone> = self
                    .base
                    .db()
                    .query(query)
                    .bind(("slug", slug_owned))
                    .await?
                    .take(0)?;
                Ok(rows.into_iter().next().map(AnyProduct::Smartphone))
            }
        }
    }

    /// All products of a kind, newest first
    pub async fn find_all(&self, kind: ProductKind) -> RepoResult<Vec<AnyProduct>> {
        let query = format!("SELECT * FROM {} ORDER BY created_at DESC", kind.table());
        self.fetch_many(kind, query, None).await
    }

    /// Products of a kind inside one category, newest first
    pub async fn find_by_category(
        &self,
        kind: ProductKind,
        category_id: &str,
    ) -> RepoResult<Vec<AnyProduct>> {
        let cat_thing = make_thing("category", category_id);
        let query = format!(
            "SELECT * FROM {} WHERE category = $cat ORDER BY created_at DESC",
            kind.table()
        );
        self.fetch_many(kind, query, Some(cat_thing)).await
    }

    /// The `limit` most recently created products of a kind
    pub async fn find_latest(&self, kind: ProductKind, limit: usize) -> RepoResult<Vec<AnyProduct>> {
        let query = format!(
            "SELECT * FROM {} ORDER BY created_at DESC LIMIT {}",
            kind.table(),
            limit
        );
        self.fetch_many(kind, query, None).await
    }

    /// Count products of a kind inside one category
    pub async fn count_by_category(&self, kind: ProductKind, category: &Thing) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT count() FROM {} WHERE category = $cat GROUP ALL",
                kind.table()
            ))
            .bind(("cat", category.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Current unit price of a referenced product
    pub async fn get_price(&self, product: &ProductRef) -> RepoResult<Decimal> {
        let found = self
            .find_by_ref(product)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", product.id)))?;
        use crate::db::models::StoreProduct;
        Ok(found.get_price())
    }

    async fn fetch_many(
        &self,
        kind: ProductKind,
        query: String,
        cat: Option<Thing>,
    ) -> RepoResult<Vec<AnyProduct>> {
        let mut q = self.base.db().query(query);
        if let Some(cat) = cat {
            q = q.bind(("cat", cat));
        }
        match kind {
            ProductKind::Notebook => {
                let rows: Vec<Notebook> = q.await?.take(0)?;
                Ok(rows.into_iter().map(AnyProduct::Notebook).collect())
            }
            ProductKind::Smartphone => {
                let rows: Vec<Smartphone> = q.await?.take(0)?;
                Ok(rows.into_iter().map(AnyProduct::Smartphone).collect())
            }
        }
    }

    // =========================================================================
    // Notebook writes
    // =========================================================================

    /// Create a new notebook
    pub async fn create_notebook(&self, data: NotebookCreate) -> RepoResult<Notebook> {
        self.check_slug_free(ProductKind::Notebook, &data.slug).await?;

        let notebook = Notebook {
            id: None,
            title: data.title,
            description: data.description,
            slug: data.slug,
            image: String::new(),
            price: data.price,
            category: make_thing("category", &data.category),
            created_at: Self::now_millis(),
            diagonal: data.diagonal,
            display_type: data.display_type,
            processor_freq: data.processor_freq,
            ram: data.ram,
            video: data.video,
            time_without_charge: data.time_without_charge,
        };

        let created: Option<Notebook> = self
            .base
            .db()
            .create(ProductKind::Notebook.table())
            .content(notebook)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create notebook".to_string()))
    }

    /// Update a notebook
    pub async fn update_notebook(&self, id: &str, data: NotebookUpdate) -> RepoResult<Notebook> {
        let table = ProductKind::Notebook.table();
        let pure_id = strip_table_prefix(table, id);

        if let Some(ref new_slug) = data.slug {
            self.check_slug_free_excluding(ProductKind::Notebook, new_slug, pure_id)
                .await?;
        }

        #[derive(Serialize)]
        struct NotebookUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<Thing>,
            #[serde(skip_serializing_if = "Option::is_none")]
            diagonal: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            display_type: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            processor_freq: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            ram: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            video: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            time_without_charge: Option<String>,
        }

        let update_data = NotebookUpdateDb {
            title: data.title,
            description: data.description,
            slug: data.slug,
            price: data.price,
            category: data.category.map(|c| make_thing("category", &c)),
            diagonal: data.diagonal,
            display_type: data.display_type,
            processor_freq: data.processor_freq,
            ram: data.ram,
            video: data.video,
            time_without_charge: data.time_without_charge,
        };

        let thing = make_thing(table, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        let updated: Option<Notebook> = self.base.db().select((table, pure_id)).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Notebook {} not found", id)))
    }

    // =========================================================================
    // Smartphone writes
    // =========================================================================

    /// Create a new smartphone. Without an SD slot the maximum SD card
    /// size is cleared, whatever the payload said.
    pub async fn create_smartphone(&self, data: SmartphoneCreate) -> RepoResult<Smartphone> {
        self.check_slug_free(ProductKind::Smartphone, &data.slug).await?;

        let sd = data.sd.unwrap_or(true);
        let sd_volume_max = if sd { data.sd_volume_max } else { None };

        let smartphone = Smartphone {
            id: None,
            title: data.title,
            description: data.description,
            slug: data.slug,
            image: String::new(),
            price: data.price,
            category: make_thing("category", &data.category),
            created_at: Self::now_millis(),
            diagonal: data.diagonal,
            display_type: data.display_type,
            resolution: data.resolution,
            accum_volume: data.accum_volume,
            ram: data.ram,
            sd,
            sd_volume_max,
            main_cam_mp: data.main_cam_mp,
            frontal_cam_mp: data.frontal_cam_mp,
        };

        let created: Option<Smartphone> = self
            .base
            .db()
            .create(ProductKind::Smartphone.table())
            .content(smartphone)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create smartphone".to_string()))
    }

    /// Update a smartphone, enforcing the SD slot rule after the merge
    pub async fn update_smartphone(
        &self,
        id: &str,
        data: SmartphoneUpdate,
    ) -> RepoResult<Smartphone> {
        let table = ProductKind::Smartphone.table();
        let pure_id = strip_table_prefix(table, id);

        if let Some(ref new_slug) = data.slug {
            self.check_slug_free_excluding(ProductKind::Smartphone, new_slug, pure_id)
                .await?;
        }

        #[derive(Serialize)]
        struct SmartphoneUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<Thing>,
            #[serde(skip_serializing_if = "Option::is_none")]
            diagonal: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            display_type: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            resolution: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            accum_volume: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            ram: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sd: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sd_volume_max: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            main_cam_mp: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            frontal_cam_mp: Option<String>,
        }

        let update_data = SmartphoneUpdateDb {
            title: data.title,
            description: data.description,
            slug: data.slug,
            price: data.price,
            category: data.category.map(|c| make_thing("category", &c)),
            diagonal: data.diagonal,
            display_type: data.display_type,
            resolution: data.resolution,
            accum_volume: data.accum_volume,
            ram: data.ram,
            sd: data.sd,
            sd_volume_max: data.sd_volume_max,
            main_cam_mp: data.main_cam_mp,
            frontal_cam_mp: data.frontal_cam_mp,
        };

        let thing = make_thing(table, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?;

        let updated: Option<Smartphone> = self.base.db().select((table, pure_id)).await?;
        let updated =
            updated.ok_or_else(|| RepoError::NotFound(format!("Smartphone {} not found", id)))?;

        // No SD slot means no SD capacity
        if !updated.sd && updated.sd_volume_max.is_some() {
            self.base
                .db()
                .query("UPDATE $thing SET sd_volume_max = NONE")
                .bind(("thing", thing))
                .await?;
            let cleared: Option<Smartphone> = self.base.db().select((table, pure_id)).await?;
            return cleared
                .ok_or_else(|| RepoError::NotFound(format!("Smartphone {} not found", id)));
        }

        Ok(updated)
    }

    // =========================================================================
    // Shared writes
    // =========================================================================

    /// Store the image path of a product
    pub async fn set_image(
        &self,
        kind: ProductKind,
        id: &str,
        image: &str,
    ) -> RepoResult<AnyProduct> {
        let pure_id = strip_table_prefix(kind.table(), id);
        let thing = make_thing(kind.table(), pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET image = $image")
            .bind(("thing", thing))
            .bind(("image", image.to_string()))
            .await?;

        self.find_by_id(kind, pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, kind: ProductKind, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(kind.table(), id);
        let existing = self.find_by_id(kind, pure_id).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        let thing = make_thing(kind.table(), pure_id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(())
    }

    async fn check_slug_free(&self, kind: ProductKind, slug: &str) -> RepoResult<()> {
        if self.find_by_slug(kind, slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "{} with slug '{}' already exists",
                kind.table(),
                slug
            )));
        }
        Ok(())
    }

    async fn check_slug_free_excluding(
        &self,
        kind: ProductKind,
        slug: &str,
        exclude_id: &str,
    ) -> RepoResult<()> {
        if let Some(found) = self.find_by_slug(kind, slug).await? {
            let same = match &found {
                AnyProduct::Notebook(n) => {
                    n.id.as_ref().map(|t| t.id.to_raw()) == Some(exclude_id.to_string())
                }
                AnyProduct::Smartphone(s) => {
                    s.id.as_ref().map(|t| t.id.to_raw()) == Some(exclude_id.to_string())
                }
            };
            if !same {
                return Err(RepoError::Duplicate(format!(
                    "{} with slug '{}' already exists",
                    kind.table(),
                    slug
                )));
            }
        }
        Ok(())
    }
}
