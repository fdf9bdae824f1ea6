//! Repository Module
//!
//! CRUD and business operations on the embedded database, one
//! repository per aggregate.

pub mod cart;
pub mod category;
pub mod customer;
pub mod order;
pub mod product;

pub use cart::CartRepository;
pub use category::CategoryRepository;
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a record id for `table`, accepting both "table:id" and bare ids
pub fn make_thing(table: &str, id: &str) -> Thing {
    let pure_id = strip_table_prefix(table, id);
    Thing::from((table.to_string(), pure_id.to_string()))
}

/// Strip a "table:" prefix from an id if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((tb, rest)) if tb == table => rest,
        _ => id,
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
