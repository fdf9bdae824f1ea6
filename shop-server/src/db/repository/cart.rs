//! Cart Repository
//!
//! Line-item mutations never leave a cart stale: every add, quantity
//! change and removal ends by recomputing the cart's `total_products`
//! and `final_price` and returns the refreshed cart.

use super::product::ProductRepository;
use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Cart, CartProduct, CartProductAdd};
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "cart";
const ITEM_TABLE: &str = "cart_product";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
    products: ProductRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    /// Create a cart, anonymous unless an owner is given
    pub async fn create(&self, owner: Option<String>) -> RepoResult<Cart> {
        let owner = owner.map(|id| make_thing("customer", &id));
        let cart = Cart::new(owner);
        let created: Option<Cart> = self.base.db().create(TABLE).content(cart).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart".to_string()))
    }

    /// Find cart by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Cart>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let cart: Option<Cart> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(cart)
    }

    /// All line items of a cart
    pub async fn list_products(&self, cart_id: &str) -> RepoResult<Vec<CartProduct>> {
        let cart_thing = make_thing(TABLE, cart_id);
        let items: Vec<CartProduct> = self
            .base
            .db()
            .query("SELECT * FROM cart_product WHERE cart = $cart")
            .bind(("cart", cart_thing))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Add a product to a cart.
    ///
    /// A product already present in the cart is left untouched; the
    /// totals are recalculated either way and the fresh cart returned.
    pub async fn add_product(&self, cart_id: &str, data: CartProductAdd) -> RepoResult<Cart> {
        let cart = self.require_cart(cart_id).await?;
        let cart_thing = make_thing(TABLE, cart_id);

        let product_thing = make_thing(data.kind.table(), &data.product_id);
        let product_ref = crate::db::models::ProductRef {
            kind: data.kind,
            id: product_thing.clone(),
        };

        let price = self.products.get_price(&product_ref).await?;

        let existing = self.find_item(&cart_thing, &product_thing).await?;
        if existing.is_none() {
            let qty = data.qty.unwrap_or(1).max(1);
            let item = CartProduct {
                id: None,
                customer: cart.owner.clone(),
                cart: cart_thing.clone(),
                product: product_ref,
                qty,
                final_price: price * Decimal::from(qty),
            };
            let _created: Option<CartProduct> =
                self.base.db().create(ITEM_TABLE).content(item).await?;
        }

        self.recalc(&cart_thing).await
    }

    /// Change a line item's quantity and reprice it
    pub async fn update_qty(&self, cart_id: &str, item_id: &str, qty: i64) -> RepoResult<Cart> {
        if qty < 1 {
            return Err(RepoError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        self.require_cart(cart_id).await?;
        let cart_thing = make_thing(TABLE, cart_id);
        let item = self.require_item(&cart_thing, item_id).await?;

        let price = self.products.get_price(&item.product).await?;

        #[derive(Serialize)]
        struct ItemUpdateDb {
            qty: i64,
            final_price: Decimal,
        }

        let item_thing = item
            .id
            .ok_or_else(|| RepoError::Database("Cart item record missing id".to_string()))?;
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", item_thing))
            .bind((
                "data",
                ItemUpdateDb {
                    qty,
                    final_price: price * Decimal::from(qty),
                },
            ))
            .await?;

        self.recalc(&cart_thing).await
    }

    /// Remove a line item
    pub async fn remove_product(&self, cart_id: &str, item_id: &str) -> RepoResult<Cart> {
        self.require_cart(cart_id).await?;
        let cart_thing = make_thing(TABLE, cart_id);
        let item = self.require_item(&cart_thing, item_id).await?;

        let item_thing = item
            .id
            .ok_or_else(|| RepoError::Database("Cart item record missing id".to_string()))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", item_thing))
            .await?;

        self.recalc(&cart_thing).await
    }

    /// Recalculate a cart's totals from its line items
    pub async fn recalculate(&self, cart_id: &str) -> RepoResult<Cart> {
        self.require_cart(cart_id).await?;
        let cart_thing = make_thing(TABLE, cart_id);
        self.recalc(&cart_thing).await
    }

    /// Mark a cart as checked out
    pub async fn mark_in_order(&self, cart_id: &str) -> RepoResult<Cart> {
        let pure_id = strip_table_prefix(TABLE, cart_id);
        let cart_thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET in_order = true")
            .bind(("thing", cart_thing))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Cart {} not found", cart_id)))
    }

    /// Recompute the aggregate columns from the line items
    async fn recalc(&self, cart_thing: &Thing) -> RepoResult<Cart> {
        let items: Vec<CartProduct> = self
            .base
            .db()
            .query("SELECT * FROM cart_product WHERE cart = $cart")
            .bind(("cart", cart_thing.clone()))
            .await?
            .take(0)?;

        let total_products = items.len() as i64;
        let final_price: Decimal = items.iter().map(|i| i.final_price).sum();

        #[derive(Serialize)]
        struct CartTotalsDb {
            total_products: i64,
            final_price: Decimal,
        }

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", cart_thing.clone()))
            .bind((
                "data",
                CartTotalsDb {
                    total_products,
                    final_price,
                },
            ))
            .await?;

        let refreshed: Option<Cart> = self
            .base
            .db()
            .select((TABLE, cart_thing.id.to_raw()))
            .await?;
        refreshed.ok_or_else(|| RepoError::NotFound(format!("Cart {} not found", cart_thing)))
    }

    async fn require_cart(&self, cart_id: &str) -> RepoResult<Cart> {
        self.find_by_id(cart_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Cart {} not found", cart_id)))
    }

    async fn find_item(
        &self,
        cart_thing: &Thing,
        product_thing: &Thing,
    ) -> RepoResult<Option<CartProduct>> {
        let items: Vec<CartProduct> = self
            .base
            .db()
            .query("SELECT * FROM cart_product WHERE cart = $cart AND product.id = $product LIMIT 1")
            .bind(("cart", cart_thing.clone()))
            .bind(("product", product_thing.clone()))
            .await?
            .take(0)?;
        Ok(items.into_iter().next())
    }

    async fn require_item(&self, cart_thing: &Thing, item_id: &str) -> RepoResult<CartProduct> {
        let pure_id = strip_table_prefix(ITEM_TABLE, item_id);
        let item: Option<CartProduct> = self.base.db().select((ITEM_TABLE, pure_id)).await?;
        let item =
            item.ok_or_else(|| RepoError::NotFound(format!("Cart item {} not found", item_id)))?;
        if &item.cart != cart_thing {
            return Err(RepoError::NotFound(format!(
                "Cart item {} not found in cart {}",
                item_id, cart_thing
            )));
        }
        Ok(item)
    }
}
