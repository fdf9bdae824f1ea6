//! Customer Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

/// Store customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<Thing>,
    /// Account name of the user this customer wraps
    pub user: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Orders placed by this customer
    #[serde(default)]
    pub orders: Vec<Thing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerCreate {
    #[validate(length(min = 1, max = 255))]
    pub user: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
}
