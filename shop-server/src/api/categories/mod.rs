//! Category API module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Sidebar feed and admin picker (before /{id} to avoid path conflicts)
        .route("/sidebar", get(handler::sidebar))
        .route("/for/{kind}", get(handler::for_kind))
        .route("/slug/{slug}", get(handler::get_by_slug))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
