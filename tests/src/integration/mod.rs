//! # Integration Tests
//!
//! End-to-end behaviour of the public API.

pub mod flows;
pub mod interop;
