//! Cart total recalculation
//! Run: cargo test -p shop-server --test cart_totals

use rust_decimal::Decimal;
use shop_server::db::models::{CartProductAdd, CategoryCreate, NotebookCreate, ProductKind};
use shop_server::db::repository::{CartRepository, CategoryRepository, ProductRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("shop").use_db("shop").await.unwrap();
    (tmp, db)
}

async fn seed_notebook(db: &Surreal<Db>, slug: &str, price: Decimal) -> String {
    let categories = CategoryRepository::new(db.clone());
    let category = match categories.find_by_slug("notebooks").await.unwrap() {
        Some(c) => c,
        None => categories
            .create(CategoryCreate {
                name: "Ноутбуки".to_string(),
                slug: "notebooks".to_string(),
            })
            .await
            .unwrap(),
    };
    let category_id = category.id.unwrap().id.to_raw();

    let products = ProductRepository::new(db.clone());
    let notebook = products
        .create_notebook(NotebookCreate {
            title: format!("Ноутбук {}", slug),
            description: None,
            slug: slug.to_string(),
            price,
            category: category_id,
            diagonal: "15.6\"".to_string(),
            display_type: "IPS".to_string(),
            processor_freq: "2.4 ГГц".to_string(),
            ram: "8 ГБ".to_string(),
            video: "GeForce GTX 1050".to_string(),
            time_without_charge: "6 часов".to_string(),
        })
        .await
        .unwrap();
    notebook.id.unwrap().id.to_raw()
}

#[tokio::test]
async fn new_cart_has_zero_totals() {
    let (_tmp, db) = test_db().await;
    let carts = CartRepository::new(db.clone());

    let cart = carts.create(None).await.unwrap();
    assert_eq!(cart.total_products, 0);
    assert_eq!(cart.final_price, Decimal::ZERO);
    assert!(cart.for_anonymous_user);
    assert!(!cart.in_order);
}

#[tokio::test]
async fn adding_product_recalculates_totals() {
    let (_tmp, db) = test_db().await;
    let carts = CartRepository::new(db.clone());

    let notebook_id = seed_notebook(&db, "acer-1", Decimal::new(1000, 2)).await;
    let cart = carts.create(None).await.unwrap();
    let cart_id = cart.id.unwrap().id.to_raw();

    let cart = carts
        .add_product(
            &cart_id,
            CartProductAdd {
                kind: ProductKind::Notebook,
                product_id: notebook_id.clone(),
                qty: Some(3),
            },
        )
        .await
        .unwrap();

    // one line item, 3 x 10.00
    assert_eq!(cart.total_products, 1);
    assert_eq!(cart.final_price, Decimal::new(3000, 2));
}

#[tokio::test]
async fn adding_same_product_twice_keeps_one_line_item() {
    let (_tmp, db) = test_db().await;
    let carts = CartRepository::new(db.clone());

    let notebook_id = seed_notebook(&db, "acer-2", Decimal::new(1000, 2)).await;
    let cart = carts.create(None).await.unwrap();
    let cart_id = cart.id.unwrap().id.to_raw();

    let add = CartProductAdd {
        kind: ProductKind::Notebook,
        product_id: notebook_id,
        qty: None,
    };
    carts.add_product(&cart_id, add.clone()).await.unwrap();
    let cart = carts.add_product(&cart_id, add).await.unwrap();

    assert_eq!(cart.total_products, 1);
    assert_eq!(cart.final_price, Decimal::new(1000, 2));
}

#[tokio::test]
async fn changing_qty_reprices_the_line_item() {
    let (_tmp, db) = test_db().await;
    let carts = CartRepository::new(db.clone());

    let notebook_id = seed_notebook(&db, "acer-3", Decimal::new(49_999, 2)).await;
    let cart = carts.create(None).await.unwrap();
    let cart_id = cart.id.unwrap().id.to_raw();

    carts
        .add_product(
            &cart_id,
            CartProductAdd {
                kind: ProductKind::Notebook,
                product_id: notebook_id,
                qty: Some(1),
            },
        )
        .await
        .unwrap();

    let items = carts.list_products(&cart_id).await.unwrap();
    assert_eq!(items.len(), 1);
    let item_id = items[0].id.as_ref().unwrap().id.to_raw();

    let cart = carts.update_qty(&cart_id, &item_id, 4).await.unwrap();
    assert_eq!(cart.total_products, 1);
    assert_eq!(cart.final_price, Decimal::new(199_996, 2));

    let items = carts.list_products(&cart_id).await.unwrap();
    assert_eq!(items[0].qty, 4);
}

#[tokio::test]
async fn removing_product_recalculates_totals() {
    let (_tmp, db) = test_db().await;
    let carts = CartRepository::new(db.clone());

    let first = seed_notebook(&db, "acer-4", Decimal::new(1000, 2)).await;
    let second = seed_notebook(&db, "acer-5", Decimal::new(2500, 2)).await;
    let cart = carts.create(None).await.unwrap();
    let cart_id = cart.id.unwrap().id.to_raw();

    for product_id in [first.clone(), second] {
        carts
            .add_product(
                &cart_id,
                CartProductAdd {
                    kind: ProductKind::Notebook,
                    product_id,
                    qty: Some(1),
                },
            )
            .await
            .unwrap();
    }

    let items = carts.list_products(&cart_id).await.unwrap();
    assert_eq!(items.len(), 2);
    let first_item = items
        .iter()
        .find(|i| i.product.id.id.to_raw() == first)
        .unwrap();
    let first_item_id = first_item.id.as_ref().unwrap().id.to_raw();

    let cart = carts.remove_product(&cart_id, &first_item_id).await.unwrap();
    assert_eq!(cart.total_products, 1);
    assert_eq!(cart.final_price, Decimal::new(2500, 2));

    let items = carts.list_products(&cart_id).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn zero_qty_is_rejected() {
    let (_tmp, db) = test_db().await;
    let carts = CartRepository::new(db.clone());

    let notebook_id = seed_notebook(&db, "acer-6", Decimal::new(1000, 2)).await;
    let cart = carts.create(None).await.unwrap();
    let cart_id = cart.id.unwrap().id.to_raw();

    carts
        .add_product(
            &cart_id,
            CartProductAdd {
                kind: ProductKind::Notebook,
                product_id: notebook_id,
                qty: Some(1),
            },
        )
        .await
        .unwrap();
    let items = carts.list_products(&cart_id).await.unwrap();
    let item_id = items[0].id.as_ref().unwrap().id.to_raw();

    let result = carts.update_qty(&cart_id, &item_id, 0).await;
    assert!(result.is_err());
}
