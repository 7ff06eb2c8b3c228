//! `tiergate-core`: domain building blocks shared by the procurement crates.
//!
//! Everything here is **pure domain** (no IO, no async, no storage clients).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AggregateId, ApplianceModelId};
pub use value_object::ValueObject;
