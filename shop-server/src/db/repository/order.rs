//! Order Repository
//!
//! Checkout creates the order, retires the cart and links the order to
//! the customer in one call.

use super::cart::CartRepository;
use super::customer::CustomerRepository;
use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{BuyingType, Order, OrderCreate, OrderStatus, OrderUpdate};
use chrono::NaiveDate;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
    carts: CartRepository,
    customers: CustomerRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            carts: CartRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    /// Find all orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Place an order from a checkout payload.
    ///
    /// The cart, when given, is marked `in_order` so it can no longer
    /// be mutated through the storefront, and the new order is appended
    /// to the customer's order list.
    pub async fn checkout(&self, data: OrderCreate) -> RepoResult<Order> {
        let customer = self
            .customers
            .find_by_id(&data.customer)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", data.customer)))?;
        let customer_thing = customer
            .id
            .ok_or_else(|| RepoError::Database("Customer record missing id".to_string()))?;

        let cart_thing = match &data.cart {
            Some(cart_id) => {
                let cart = self
                    .carts
                    .find_by_id(cart_id)
                    .await?
                    .ok_or_else(|| RepoError::NotFound(format!("Cart {} not found", cart_id)))?;
                if cart.in_order {
                    return Err(RepoError::Validation(format!(
                        "Cart {} has already been checked out",
                        cart_id
                    )));
                }
                Some(make_thing("cart", cart_id))
            }
            None => None,
        };

        let order = Order {
            id: None,
            customer: customer_thing.clone(),
            first_name: data.first_name,
            last_name: data.last_name,
            phone: data.phone,
            cart: cart_thing.clone(),
            address: data.address,
            status: OrderStatus::New,
            buying_type: data.buying_type.unwrap_or_default(),
            comment: data.comment,
            order_date: data.order_date,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))?;
        let order_thing = created
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Order record missing id".to_string()))?;

        if let Some(cart) = &cart_thing {
            self.carts.mark_in_order(&cart.id.to_raw()).await?;
        }
        self.customers
            .add_order(&customer_thing.id.to_raw(), order_thing)
            .await?;

        Ok(created)
    }

    /// Update an order. The creation timestamp is refreshed on every
    /// save, matching the original system's behavior.
    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id);
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        #[derive(Serialize)]
        struct OrderUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<OrderStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            buying_type: Option<BuyingType>,
            #[serde(skip_serializing_if = "Option::is_none")]
            address: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            comment: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            order_date: Option<NaiveDate>,
            created_at: i64,
        }

        let update_data = OrderUpdateDb {
            status: data.status,
            buying_type: data.buying_type,
            address: data.address,
            comment: data.comment,
            order_date: data.order_date,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
