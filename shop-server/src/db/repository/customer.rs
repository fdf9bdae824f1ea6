//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Customer, CustomerCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all customers
    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer ORDER BY user")
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Find customer by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let customer: Option<Customer> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(customer)
    }

    /// Find customer by account name
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Option<Customer>> {
        let user_owned = user.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE user = $user LIMIT 1")
            .bind(("user", user_owned))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create a new customer. One customer per account.
    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        if self.find_by_user(&data.user).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Customer for user '{}' already exists",
                data.user
            )));
        }

        let customer = Customer {
            id: None,
            user: data.user,
            phone: data.phone,
            address: data.address,
            orders: Vec::new(),
        };

        let created: Option<Customer> = self.base.db().create(TABLE).content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    /// Append an order to the customer's order list
    pub async fn add_order(&self, customer_id: &str, order: Thing) -> RepoResult<Customer> {
        let pure_id = strip_table_prefix(TABLE, customer_id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET orders += $order")
            .bind(("thing", thing))
            .bind(("order", order))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", customer_id)))
    }
}
