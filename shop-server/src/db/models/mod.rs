//! Database models
//!
//! One module per table. Record links between tables use
//! `surrealdb::sql::Thing`; product subtype polymorphism is a tagged
//! union ([`ProductKind`] + [`ProductRef`]) instead of a generic
//! name-to-table reference.

pub mod cart;
pub mod category;
pub mod customer;
pub mod order;
pub mod product;

pub use cart::{Cart, CartProduct, CartProductAdd, CartProductQty};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use customer::{Customer, CustomerCreate};
pub use order::{BuyingType, Order, OrderCreate, OrderStatus, OrderUpdate};
pub use product::{
    AnyProduct, Notebook, NotebookCreate, NotebookUpdate, ProductKind, ProductRef, Smartphone,
    SmartphoneCreate, SmartphoneUpdate, StoreProduct,
};
