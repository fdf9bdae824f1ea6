//! Product subtype rules: unique slugs and the SD slot invariant
//! Run: cargo test -p shop-server --test product_rules

use rust_decimal::Decimal;
use shop_server::db::models::{
    CategoryCreate, NotebookCreate, ProductKind, SmartphoneCreate, SmartphoneUpdate,
};
use shop_server::db::repository::{CategoryRepository, ProductRepository, RepoError};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("shop").use_db("shop").await.unwrap();
    (tmp, db)
}

async fn seed_category(db: &Surreal<Db>, name: &str, slug: &str) -> String {
    let categories = CategoryRepository::new(db.clone());
    let category = categories
        .create(CategoryCreate {
            name: name.to_string(),
            slug: slug.to_string(),
        })
        .await
        .unwrap();
    category.id.unwrap().id.to_raw()
}

fn smartphone_payload(slug: &str, category: &str, sd: Option<bool>) -> SmartphoneCreate {
    SmartphoneCreate {
        title: format!("Смартфон {}", slug),
        description: None,
        slug: slug.to_string(),
        price: Decimal::new(25_000, 2),
        category: category.to_string(),
        diagonal: "6.1\"".to_string(),
        display_type: "OLED".to_string(),
        resolution: "2532x1170".to_string(),
        accum_volume: "3200 мАч".to_string(),
        ram: "8 ГБ".to_string(),
        sd,
        sd_volume_max: Some("512 ГБ".to_string()),
        main_cam_mp: "12".to_string(),
        frontal_cam_mp: "12".to_string(),
    }
}

#[tokio::test]
async fn duplicate_slug_is_rejected_per_subtype() {
    let (_tmp, db) = test_db().await;
    let category = seed_category(&db, "Смартфоны", "smartphones").await;
    let products = ProductRepository::new(db.clone());

    products
        .create_smartphone(smartphone_payload("iphone", &category, Some(true)))
        .await
        .unwrap();
    let second = products
        .create_smartphone(smartphone_payload("iphone", &category, Some(true)))
        .await;
    assert!(matches!(second, Err(RepoError::Duplicate(_))));
}

#[tokio::test]
async fn same_slug_is_allowed_across_subtypes() {
    let (_tmp, db) = test_db().await;
    let category = seed_category(&db, "Уценка", "sale").await;
    let products = ProductRepository::new(db.clone());

    products
        .create_smartphone(smartphone_payload("flagship", &category, Some(true)))
        .await
        .unwrap();

    // slugs are unique within a subtype table, not globally
    let notebook = products
        .create_notebook(NotebookCreate {
            title: "Ноутбук Flagship".to_string(),
            description: None,
            slug: "flagship".to_string(),
            price: Decimal::new(90_000, 2),
            category,
            diagonal: "16\"".to_string(),
            display_type: "Mini-LED".to_string(),
            processor_freq: "3.5 ГГц".to_string(),
            ram: "32 ГБ".to_string(),
            video: "RTX 4070".to_string(),
            time_without_charge: "8 часов".to_string(),
        })
        .await;
    assert!(notebook.is_ok());
}

#[tokio::test]
async fn smartphone_without_sd_slot_loses_capacity_on_create() {
    let (_tmp, db) = test_db().await;
    let category = seed_category(&db, "Смартфоны", "smartphones").await;
    let products = ProductRepository::new(db.clone());

    let phone = products
        .create_smartphone(smartphone_payload("no-sd", &category, Some(false)))
        .await
        .unwrap();

    assert!(!phone.sd);
    assert_eq!(phone.sd_volume_max, None);
}

#[tokio::test]
async fn disabling_sd_slot_clears_capacity_on_update() {
    let (_tmp, db) = test_db().await;
    let category = seed_category(&db, "Смартфоны", "smartphones").await;
    let products = ProductRepository::new(db.clone());

    let phone = products
        .create_smartphone(smartphone_payload("with-sd", &category, Some(true)))
        .await
        .unwrap();
    assert_eq!(phone.sd_volume_max, Some("512 ГБ".to_string()));
    let phone_id = phone.id.unwrap().id.to_raw();

    let updated = products
        .update_smartphone(
            &phone_id,
            SmartphoneUpdate {
                sd: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.sd);
    assert_eq!(updated.sd_volume_max, None);
}

#[tokio::test]
async fn category_with_products_cannot_be_deleted() {
    let (_tmp, db) = test_db().await;
    let category_id = seed_category(&db, "Смартфоны", "smartphones").await;
    let products = ProductRepository::new(db.clone());
    products
        .create_smartphone(smartphone_payload("busy", &category_id, Some(true)))
        .await
        .unwrap();

    let categories = CategoryRepository::new(db.clone());
    let result = categories.delete(&category_id).await;
    assert!(matches!(result, Err(RepoError::Validation(_))));

    // after the product is gone the category can be removed
    let phone = products
        .find_by_slug(ProductKind::Smartphone, "busy")
        .await
        .unwrap()
        .unwrap();
    let phone_id = match phone {
        shop_server::db::models::AnyProduct::Smartphone(s) => s.id.unwrap().id.to_raw(),
        _ => unreachable!(),
    };
    products
        .delete(ProductKind::Smartphone, &phone_id)
        .await
        .unwrap();
    assert!(categories.delete(&category_id).await.unwrap());
}
