//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate, ProductKind};
use crate::db::repository::CategoryRepository;
use crate::services::{CatalogService, SidebarCategory};
use crate::utils::{AppError, AppResult};

/// GET /api/categories - list all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(categories))
}

/// GET /api/categories/sidebar - categories with product counts
pub async fn sidebar(State(state): State<ServerState>) -> AppResult<Json<Vec<SidebarCategory>>> {
    let catalog = CatalogService::new(state.db.clone());
    let sidebar = catalog.sidebar_categories().await?;
    Ok(Json(sidebar))
}

/// GET /api/categories/for/{kind} - categories offered when editing a
/// product of the given subtype
pub async fn for_kind(
    State(state): State<ServerState>,
    Path(kind): Path<ProductKind>,
) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    let offered = categories
        .into_iter()
        .filter(|c| c.slug == kind.category_slug())
        .collect();
    Ok(Json(offered))
}

/// GET /api/categories/{id} - get one category
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;
    Ok(Json(category))
}

/// GET /api/categories/slug/{slug} - get one category by slug
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category '{}' not found", slug)))?;
    Ok(Json(category))
}

/// POST /api/categories - create a category
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(payload).await?;
    Ok(Json(category))
}

/// PUT /api/categories/{id} - update a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.update(&id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id} - delete a category without products
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CategoryRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
