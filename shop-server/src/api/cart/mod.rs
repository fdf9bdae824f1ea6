//! Cart API module
//!
//! Every line-item mutation responds with the refreshed cart, totals
//! already recalculated; clients never recompute them.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/items", get(handler::list_items).post(handler::add_item))
        .route(
            "/{id}/items/{item_id}",
            put(handler::update_item_qty).delete(handler::remove_item),
        )
}
