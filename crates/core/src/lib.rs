//! `evpool-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! caller-assigned identifiers and the shared domain error model.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{GroupId, VehicleId};
