//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Customer, CustomerCreate};
use crate::db::repository::CustomerRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/customers - list all customers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customers = repo.find_all().await?;
    Ok(Json(customers))
}

/// GET /api/customers/{id} - get one customer
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {} not found", id)))?;
    Ok(Json(customer))
}

/// POST /api/customers - create a customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.create(payload).await?;
    Ok(Json(customer))
}
