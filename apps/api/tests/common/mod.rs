//! Common test utilities for API integration tests
//!
//! Shared fixtures, an isolated-schema database harness, and helpers for
//! driving the router in-process.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
