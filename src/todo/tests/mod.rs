//! Unit tests for the todo bounded context.

mod domain_tests;
