//! Adapter implementations of the todo repository port.

pub mod memory;
pub mod postgres;
