//! `mechanic-shop-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy shared by every layer and the statically declared field
//! rules that entity codecs are built from.

pub mod error;
pub mod field;

pub use error::{DomainError, DomainResult};
pub use field::{as_object, FieldErrors, FieldSpec, JsonObject};
