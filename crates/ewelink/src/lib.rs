//! eWeLink cloud API integration.
//!
//! - `client`: HTTP client for the eWeLink v2 REST API (OAuth token
//!   exchange, device listing, device control)
//! - `signature`: HMAC-SHA256 request signing and nonce generation
//! - `types`: wire types for the eWeLink response envelope and payloads

pub mod client;
pub mod signature;
pub mod types;

pub use client::{EwelinkClient, EwelinkError};
