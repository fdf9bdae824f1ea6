//! Shop Server - online electronics storefront backend
//!
//! # Module structure
//!
//! ```text
//! shop-server/src/
//! ├── core/          # Configuration, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded database layer (models + repositories)
//! ├── services/      # Catalog feed, spec rendering, image checks
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};
