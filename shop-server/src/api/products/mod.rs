//! Product API module
//!
//! All product routes take the subtype as a path segment
//! ("notebook" or "smartphone"); handlers dispatch on the parsed
//! [`crate::db::models::ProductKind`].

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::core::ServerState;

/// Request body cap for image uploads. Sits above the 3 MiB image
/// size limit so that `validate_image` stays the authoritative bound
/// and oversized files get the named error, not a transport error.
const UPLOAD_BODY_LIMIT: usize = 4 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Latest feed and image serving (before /{kind} to avoid path conflicts)
        .route("/latest", get(handler::latest))
        .route("/image/{filename}", get(handler::serve_image))
        .route("/{kind}", get(handler::list).post(handler::create))
        .route("/{kind}/slug/{slug}", get(handler::get_by_slug))
        .route("/{kind}/category/{category_id}", get(handler::list_by_category))
        .route(
            "/{kind}/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{kind}/{id}/spec", get(handler::spec))
        .route(
            "/{kind}/{id}/image",
            post(handler::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}
