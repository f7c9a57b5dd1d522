use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use mechanic_shop_customers::{Customer, CustomerChanges, CustomerId, NewCustomer};

use super::r#trait::{CustomerStore, StoreError, StoreResult};

#[derive(Debug)]
struct Rows {
    /// Last id handed out. Ids are never reused, even after a delete.
    last_id: i64,
    by_id: BTreeMap<CustomerId, Customer>,
}

impl Rows {
    fn email_taken(&self, email: &str, except: Option<CustomerId>) -> bool {
        self.by_id
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

/// In-memory customer store.
///
/// Intended for tests/dev. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryCustomerStore {
    inner: RwLock<Rows>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                last_id: 0,
                by_id: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory customer store lock poisoned".to_string())
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn insert(&self, customer: NewCustomer) -> StoreResult<Customer> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        if rows.email_taken(&customer.email, None) {
            return Err(StoreError::duplicate_email(&customer.email));
        }

        rows.last_id += 1;
        let stored = customer.with_id(CustomerId(rows.last_id));
        rows.by_id.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: CustomerId) -> StoreResult<Customer> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        rows.by_id.get(&id).cloned().ok_or_else(StoreError::not_found)
    }

    async fn list_all(&self) -> StoreResult<Vec<Customer>> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.by_id.values().cloned().collect())
    }

    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> StoreResult<Customer> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        let existing = rows.by_id.get(&id).ok_or_else(StoreError::not_found)?;
        let merged = changes.apply_to(existing);

        if rows.email_taken(&merged.email, Some(id)) {
            return Err(StoreError::duplicate_email(&merged.email));
        }

        rows.by_id.insert(id, merged.clone());
        Ok(merged)
    }

    async fn delete(&self, id: CustomerId) -> StoreResult<()> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        rows.by_id
            .remove(&id)
            .map(|_| ())
            .ok_or_else(StoreError::not_found)
    }
}
