//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that wallet code calls

pub mod inbound;
