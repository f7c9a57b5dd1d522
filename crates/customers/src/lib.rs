//! Customers domain module.
//!
//! This crate contains the Customer entity and its wire codec, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod codec;
pub mod customer;

pub use codec::{decode, decode_changes, decode_partial, encode, encode_many};
pub use customer::{
    Customer, CustomerChanges, CustomerId, NewCustomer, ADDRESS, CUSTOMER_FIELDS, EMAIL,
    FIRST_NAME, LAST_NAME, PHONE,
};
