//! Cart Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::product::{ProductKind, ProductRef};

pub type CartId = Thing;

/// Shopping cart
///
/// `total_products` and `final_price` always mirror the cart's line
/// items; the repository recalculates both after every line-item
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: Option<CartId>,
    /// Owning customer; `None` for anonymous carts
    pub owner: Option<Thing>,
    /// Number of line items
    #[serde(default)]
    pub total_products: i64,
    /// Sum of line-item final prices
    #[serde(default)]
    pub final_price: Decimal,
    /// Set once an order has been placed from this cart
    #[serde(default)]
    pub in_order: bool,
    #[serde(default)]
    pub for_anonymous_user: bool,
}

impl Cart {
    pub fn new(owner: Option<Thing>) -> Self {
        let for_anonymous_user = owner.is_none();
        Self {
            id: None,
            owner,
            total_products: 0,
            final_price: Decimal::ZERO,
            in_order: false,
            for_anonymous_user,
        }
    }
}

/// One product-quantity pairing inside a cart
///
/// `final_price` is recomputed from the referenced product's current
/// price on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: Option<Thing>,
    /// Buying customer; `None` inside anonymous carts
    pub customer: Option<Thing>,
    /// Parent cart
    pub cart: Thing,
    /// Tagged reference to exactly one product
    pub product: ProductRef,
    pub qty: i64,
    pub final_price: Decimal,
}

/// Payload for adding a line item to a cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProductAdd {
    pub kind: ProductKind,
    /// Product id ("notebook:xxx" or bare id)
    pub product_id: String,
    /// Defaults to 1
    pub qty: Option<i64>,
}

/// Payload for changing a line item's quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProductQty {
    pub qty: i64,
}
