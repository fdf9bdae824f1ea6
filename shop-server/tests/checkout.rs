//! Checkout flow
//! Run: cargo test -p shop-server --test checkout

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shop_server::db::models::{
    BuyingType, CartProductAdd, CategoryCreate, CustomerCreate, NotebookCreate, OrderCreate,
    OrderStatus, OrderUpdate, ProductKind,
};
use shop_server::db::repository::{
    CartRepository, CategoryRepository, CustomerRepository, OrderRepository, ProductRepository,
};
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("shop").use_db("shop").await.unwrap();
    (tmp, db)
}

/// Customer with a one-notebook cart, ready for checkout
async fn seed_checkout(db: &Surreal<Db>) -> (String, String) {
    let categories = CategoryRepository::new(db.clone());
    let category = categories
        .create(CategoryCreate {
            name: "Ноутбуки".to_string(),
            slug: "notebooks".to_string(),
        })
        .await
        .unwrap();
    let category_id = category.id.unwrap().id.to_raw();

    let products = ProductRepository::new(db.clone());
    let notebook = products
        .create_notebook(NotebookCreate {
            title: "Ноутбук Lenovo".to_string(),
            description: None,
            slug: "lenovo".to_string(),
            price: Decimal::new(45_000, 2),
            category: category_id,
            diagonal: "14\"".to_string(),
            display_type: "IPS".to_string(),
            processor_freq: "2.8 ГГц".to_string(),
            ram: "16 ГБ".to_string(),
            video: "Intel Iris Xe".to_string(),
            time_without_charge: "9 часов".to_string(),
        })
        .await
        .unwrap();

    let customers = CustomerRepository::new(db.clone());
    let customer = customers
        .create(CustomerCreate {
            user: "ivan".to_string(),
            phone: Some("+79990001122".to_string()),
            address: None,
        })
        .await
        .unwrap();
    let customer_id = customer.id.unwrap().id.to_raw();

    let carts = CartRepository::new(db.clone());
    let cart = carts.create(Some(customer_id.clone())).await.unwrap();
    let cart_id = cart.id.unwrap().id.to_raw();
    carts
        .add_product(
            &cart_id,
            CartProductAdd {
                kind: ProductKind::Notebook,
                product_id: notebook.id.unwrap().id.to_raw(),
                qty: Some(1),
            },
        )
        .await
        .unwrap();

    (customer_id, cart_id)
}

fn checkout_payload(customer: &str, cart: &str) -> OrderCreate {
    OrderCreate {
        customer: customer.to_string(),
        cart: Some(cart.to_string()),
        first_name: "Иван".to_string(),
        last_name: "Петров".to_string(),
        phone: "+79990001122".to_string(),
        address: Some("Москва, Тверская 1".to_string()),
        buying_type: Some(BuyingType::Delivery),
        comment: None,
        order_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
    }
}

#[tokio::test]
async fn checkout_creates_order_and_retires_cart() {
    let (_tmp, db) = test_db().await;
    let (customer_id, cart_id) = seed_checkout(&db).await;

    let orders = OrderRepository::new(db.clone());
    let order = orders
        .checkout(checkout_payload(&customer_id, &cart_id))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.buying_type, BuyingType::Delivery);
    assert!(order.created_at > 0);

    // the cart can no longer be used for another order
    let carts = CartRepository::new(db.clone());
    let cart = carts.find_by_id(&cart_id).await.unwrap().unwrap();
    assert!(cart.in_order);

    // the order shows up on the customer
    let customers = CustomerRepository::new(db.clone());
    let customer = customers.find_by_id(&customer_id).await.unwrap().unwrap();
    assert_eq!(customer.orders.len(), 1);
    assert_eq!(customer.orders[0], order.id.unwrap());
}

#[tokio::test]
async fn checked_out_cart_is_rejected_twice() {
    let (_tmp, db) = test_db().await;
    let (customer_id, cart_id) = seed_checkout(&db).await;

    let orders = OrderRepository::new(db.clone());
    orders
        .checkout(checkout_payload(&customer_id, &cart_id))
        .await
        .unwrap();

    let second = orders
        .checkout(checkout_payload(&customer_id, &cart_id))
        .await;
    assert!(second.is_err());
}

#[tokio::test]
async fn checkout_with_unknown_customer_fails() {
    let (_tmp, db) = test_db().await;

    let orders = OrderRepository::new(db.clone());
    let result = orders.checkout(checkout_payload("missing", "missing")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn updating_an_order_refreshes_its_timestamp() {
    let (_tmp, db) = test_db().await;
    let (customer_id, cart_id) = seed_checkout(&db).await;

    let orders = OrderRepository::new(db.clone());
    let order = orders
        .checkout(checkout_payload(&customer_id, &cart_id))
        .await
        .unwrap();
    let order_id = order.id.unwrap().id.to_raw();
    let created_at = order.created_at;

    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = orders
        .update(
            &order_id,
            OrderUpdate {
                status: Some(OrderStatus::InProgress),
                buying_type: None,
                address: None,
                comment: None,
                order_date: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, OrderStatus::InProgress);
    assert!(updated.created_at > created_at);
}

#[tokio::test]
async fn any_status_can_be_set_at_any_time() {
    let (_tmp, db) = test_db().await;
    let (customer_id, cart_id) = seed_checkout(&db).await;

    let orders = OrderRepository::new(db.clone());
    let order = orders
        .checkout(checkout_payload(&customer_id, &cart_id))
        .await
        .unwrap();
    let order_id = order.id.unwrap().id.to_raw();

    // jump straight to completed, then back to new
    for status in [OrderStatus::Completed, OrderStatus::New] {
        let updated = orders
            .update(
                &order_id,
                OrderUpdate {
                    status: Some(status),
                    buying_type: None,
                    address: None,
                    comment: None,
                    order_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, status);
    }
}
