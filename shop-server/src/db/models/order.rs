//! Order Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

/// Order status
///
/// The lifecycle is nominally linear (new → in_progress → ready →
/// completed) but transitions are not enforced; any status can be set
/// at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    InProgress,
    Ready,
    Completed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::New
    }
}

/// Fulfillment choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyingType {
    /// Self-pickup
    #[serde(rename = "self")]
    SelfPickup,
    Delivery,
}

impl Default for BuyingType {
    fn default() -> Self {
        BuyingType::SelfPickup
    }
}

/// Customer order, created at checkout from a cart snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<Thing>,
    pub customer: Thing,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Cart the order was placed from
    pub cart: Option<Thing>,
    pub address: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub buying_type: BuyingType,
    pub comment: Option<String>,
    /// Requested delivery / pickup date
    pub order_date: NaiveDate,
    /// Unix milliseconds. Refreshed on every save, matching the
    /// original system's behavior.
    #[serde(default)]
    pub created_at: i64,
}

/// Checkout form payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    /// Customer id ("customer:xxx" or bare id)
    pub customer: String,
    /// Cart id to place the order from
    pub cart: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(length(min = 1, max = 12))]
    pub phone: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub buying_type: Option<BuyingType>,
    pub comment: Option<String>,
    pub order_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buying_type: Option<BuyingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,
}
