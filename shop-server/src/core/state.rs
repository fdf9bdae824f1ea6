use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared server state
///
/// Holds the configuration and the embedded database handle. `Surreal`
/// is internally reference counted, so cloning the state is cheap and
/// every handler sees the same database.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// Initialize the server state
    ///
    /// 1. Ensure the work directory layout exists
    /// 2. Open the embedded database at `work_dir/database/shop.db`
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {}", e)))?;

        let db_path = config.database_dir().join("shop.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// Get a handle to the database
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
