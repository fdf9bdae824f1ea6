//! Service Module
//!
//! Domain logic that sits above the repositories: storefront feeds,
//! the specification table renderer and image validation.

pub mod catalog;
pub mod image_check;
pub mod spec_table;

pub use catalog::{CatalogService, SidebarCategory};
pub use image_check::{ImageError, validate_image};
pub use spec_table::render_spec;
