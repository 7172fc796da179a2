//! # Domain Layer
//!
//! Keys, signatures and their encodings. No I/O.

pub mod bytes;
pub mod config;
pub mod curve;
pub mod encoding;
pub mod entities;
pub mod errors;
pub mod message;
pub mod network;
pub mod private_key;
pub mod public_key;
pub mod signature;
