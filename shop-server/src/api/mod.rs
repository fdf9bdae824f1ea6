//! API route modules
//!
//! - [`health`] - health checks
//! - [`categories`] - category management and the sidebar feed
//! - [`products`] - product management, latest feed, spec tables, images
//! - [`cart`] - cart and line-item operations
//! - [`customers`] - customer management
//! - [`orders`] - checkout and order management

pub mod cart;
pub mod categories;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
