use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use mechanic_shop_core::DomainError;
use mechanic_shop_customers::{Customer, CustomerChanges, CustomerId, NewCustomer};

/// Storage error.
///
/// Expected outcomes (`NotFound`, `ConstraintViolation`) travel as
/// [`DomainError`] so callers can branch on kind; everything else is a backend
/// failure that callers should treat as opaque.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found() -> Self {
        Self::Domain(DomainError::NotFound)
    }

    pub fn duplicate_email(email: &str) -> Self {
        Self::Domain(DomainError::constraint(format!(
            "a customer with email '{email}' already exists"
        )))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable keyed storage for customer records.
///
/// Implementations enforce email uniqueness themselves; callers never check
/// for duplicates up front.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, customer: NewCustomer) -> StoreResult<Customer>;

    async fn get_by_id(&self, id: CustomerId) -> StoreResult<Customer>;

    /// All records, ordered by id. Empty (not an error) when nothing is stored.
    async fn list_all(&self) -> StoreResult<Vec<Customer>>;

    /// Merge `changes` into the stored record and persist the result.
    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> StoreResult<Customer>;

    /// Hard delete. Deleting an absent id is `NotFound`, including a repeat delete.
    async fn delete(&self, id: CustomerId) -> StoreResult<()>;
}

#[async_trait]
impl<S> CustomerStore for Arc<S>
where
    S: CustomerStore + ?Sized,
{
    async fn insert(&self, customer: NewCustomer) -> StoreResult<Customer> {
        (**self).insert(customer).await
    }

    async fn get_by_id(&self, id: CustomerId) -> StoreResult<Customer> {
        (**self).get_by_id(id).await
    }

    async fn list_all(&self) -> StoreResult<Vec<Customer>> {
        (**self).list_all().await
    }

    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> StoreResult<Customer> {
        (**self).update(id, changes).await
    }

    async fn delete(&self, id: CustomerId) -> StoreResult<()> {
        (**self).delete(id).await
    }
}
