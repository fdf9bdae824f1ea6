//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Cart, CartProduct, CartProductAdd, CartProductQty};
use crate::db::repository::CartRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize, Default)]
pub struct CartCreate {
    /// Owning customer id; omit for an anonymous cart
    pub owner: Option<String>,
}

/// POST /api/cart - create a cart
pub async fn create(
    State(state): State<ServerState>,
    payload: Option<Json<CartCreate>>,
) -> AppResult<Json<Cart>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let repo = CartRepository::new(state.db.clone());
    let cart = repo.create(payload.owner).await?;
    Ok(Json(cart))
}

/// GET /api/cart/{id} - get a cart
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Cart>> {
    let repo = CartRepository::new(state.db.clone());
    let cart = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cart {} not found", id)))?;
    Ok(Json(cart))
}

/// GET /api/cart/{id}/items - list the cart's line items
pub async fn list_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CartProduct>>> {
    let repo = CartRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cart {} not found", id)))?;
    let items = repo.list_products(&id).await?;
    Ok(Json(items))
}

/// POST /api/cart/{id}/items - add a product, returns the fresh cart
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CartProductAdd>,
) -> AppResult<Json<Cart>> {
    let repo = CartRepository::new(state.db.clone());
    let cart = repo.add_product(&id, payload).await?;
    Ok(Json(cart))
}

/// PUT /api/cart/{id}/items/{item_id} - change quantity, returns the fresh cart
pub async fn update_item_qty(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<CartProductQty>,
) -> AppResult<Json<Cart>> {
    let repo = CartRepository::new(state.db.clone());
    let cart = repo.update_qty(&id, &item_id, payload.qty).await?;
    Ok(Json(cart))
}

/// DELETE /api/cart/{id}/items/{item_id} - remove a line item, returns the fresh cart
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<Cart>> {
    let repo = CartRepository::new(state.db.clone());
    let cart = repo.remove_product(&id, &item_id).await?;
    Ok(Json(cart))
}
