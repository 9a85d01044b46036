//! Domain types, rules, and pure helpers for the cinema backend.
//!
//! This crate has no database or HTTP dependencies so that the policy,
//! filtering, and validation logic can be unit tested in isolation.

pub mod error;
pub mod filters;
pub mod pagination;
pub mod permissions;
pub mod tickets;
pub mod types;
pub mod validation;
