//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderUpdate};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/orders - list all orders, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - get one order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// POST /api/orders - place an order from the checkout form
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.checkout(payload).await?;
    Ok(Json(order))
}

/// PUT /api/orders/{id} - update an order
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update(&id, payload).await?;
    Ok(Json(order))
}
