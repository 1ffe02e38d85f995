//! Todo API: a layered CRUD service for todo records.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: validated todo values with no infrastructure dependencies
//! - **Ports**: the async repository contract
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the port
//! - **Services**: DTO mapping and update-conflict resolution
//! - **API**: axum handlers translating HTTP to service calls
//!
//! # Modules
//!
//! - [`todo`]: the todo bounded context
//! - [`config`]: environment-driven runtime configuration

pub mod config;
pub mod todo;
