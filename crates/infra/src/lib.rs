//! Infrastructure layer: customer persistence.

pub mod store;

pub use store::{
    CustomerStore, InMemoryCustomerStore, SqliteCustomerStore, StoreError, StoreResult,
};
