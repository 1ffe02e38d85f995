//! Todo record management.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The HTTP surface in [`api`]
//!
//! Requests flow `api` → `services` → `ports` → `adapters`; views flow back
//! and are mapped at the service boundary.

pub mod adapters;
pub mod api;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
