//! Product API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::{
    AnyProduct, NotebookCreate, NotebookUpdate, ProductKind, SmartphoneCreate, SmartphoneUpdate,
};
use crate::db::repository::ProductRepository;
use crate::services::{render_spec, validate_image};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    /// Comma-separated subtype list, defaults to all subtypes
    pub kinds: Option<String>,
    /// Subtype whose block leads the feed
    pub priority: Option<ProductKind>,
}

/// GET /api/products/latest - home page feed
pub async fn latest(
    State(state): State<ServerState>,
    Query(params): Query<LatestParams>,
) -> AppResult<Json<Vec<AnyProduct>>> {
    let kinds = match &params.kinds {
        Some(raw) => raw
            .split(',')
            .map(|s| s.trim().parse::<ProductKind>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::Invalid)?,
        None => vec![ProductKind::Notebook, ProductKind::Smartphone],
    };

    let catalog = crate::services::CatalogService::new(state.db.clone());
    let feed = catalog.latest_products(&kinds, params.priority).await?;
    Ok(Json(feed))
}

/// GET /api/products/{kind} - list all products of a subtype
pub async fn list(
    State(state): State<ServerState>,
    Path(kind): Path<ProductKind>,
) -> AppResult<Json<Vec<AnyProduct>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all(kind).await?;
    Ok(Json(products))
}

/// GET /api/products/{kind}/category/{category_id} - list by category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path((kind, category_id)): Path<(ProductKind, String)>,
) -> AppResult<Json<Vec<AnyProduct>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_by_category(kind, &category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/{kind}/{id} - get one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(ProductKind, String)>,
) -> AppResult<Json<AnyProduct>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(kind, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// GET /api/products/{kind}/slug/{slug} - get one product by slug
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path((kind, slug)): Path<(ProductKind, String)>,
) -> AppResult<Json<AnyProduct>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_slug(kind, &slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product '{}' not found", slug)))?;
    Ok(Json(product))
}

/// POST /api/products/{kind} - create a product
///
/// The payload shape depends on the subtype, so the body is decoded
/// after the kind is known.
pub async fn create(
    State(state): State<ServerState>,
    Path(kind): Path<ProductKind>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<AnyProduct>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = match kind {
        ProductKind::Notebook => {
            let data: NotebookCreate = serde_json::from_value(payload)
                .map_err(|e| AppError::Invalid(format!("Invalid notebook payload: {}", e)))?;
            AnyProduct::Notebook(repo.create_notebook(data).await?)
        }
        ProductKind::Smartphone => {
            let data: SmartphoneCreate = serde_json::from_value(payload)
                .map_err(|e| AppError::Invalid(format!("Invalid smartphone payload: {}", e)))?;
            AnyProduct::Smartphone(repo.create_smartphone(data).await?)
        }
    };
    Ok(Json(product))
}

/// PUT /api/products/{kind}/{id} - update a product
pub async fn update(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(ProductKind, String)>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<AnyProduct>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = match kind {
        ProductKind::Notebook => {
            let data: NotebookUpdate = serde_json::from_value(payload)
                .map_err(|e| AppError::Invalid(format!("Invalid notebook payload: {}", e)))?;
            AnyProduct::Notebook(repo.update_notebook(&id, data).await?)
        }
        ProductKind::Smartphone => {
            let data: SmartphoneUpdate = serde_json::from_value(payload)
                .map_err(|e| AppError::Invalid(format!("Invalid smartphone payload: {}", e)))?;
            AnyProduct::Smartphone(repo.update_smartphone(&id, data).await?)
        }
    };
    Ok(Json(product))
}

/// DELETE /api/products/{kind}/{id} - delete a product
pub async fn delete(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(ProductKind, String)>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(kind, &id).await?;
    Ok(Json(true))
}

/// GET /api/products/{kind}/{id}/spec - specification table fragment
pub async fn spec(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(ProductKind, String)>,
) -> AppResult<Html<String>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(kind, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Html(render_spec(&product)))
}

/// POST /api/products/{kind}/{id}/image - upload a product image
pub async fn upload_image(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(ProductKind, String)>,
    mut multipart: Multipart,
) -> AppResult<Json<AnyProduct>> {
    let mut uploaded: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        let original_name = field.file_name().unwrap_or("upload.png").to_string();
        let data = field.bytes().await?;
        uploaded = Some((original_name, data.to_vec()));
        break;
    }

    let (original_name, data) =
        uploaded.ok_or_else(|| AppError::validation("No image field in request"))?;

    validate_image(&data)?;

    let ext = std::path::Path::new(&original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_ascii_lowercase();
    let filename = format!("{}-{}.{}", kind, Uuid::new_v4(), ext);

    let images_dir = state.config.images_dir();
    tokio::fs::create_dir_all(&images_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create images dir: {}", e)))?;
    tokio::fs::write(images_dir.join(&filename), &data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to store image: {}", e)))?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.set_image(kind, &id, &filename).await?;
    Ok(Json(product))
}

/// GET /api/products/image/{filename} - serve a stored product image
pub async fn serve_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> Response {
    // Prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return (StatusCode::BAD_REQUEST, "Invalid filename").into_response();
    }

    let file_path = state.config.images_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = match file_path.extension().and_then(|e| e.to_str()) {
                Some("png") => "image/png",
                Some("jpg") | Some("jpeg") => "image/jpeg",
                Some("webp") => "image/webp",
                _ => "application/octet-stream",
            };
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], content).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}
