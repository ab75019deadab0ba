//! Domain types and pure logic for the SONOFF device portal.
//!
//! Everything here is I/O-free: telemetry readings, per-device limits, the
//! threshold evaluator, and the alert record. The API crate owns the stores,
//! the vendor client, and everything that talks to the network.

pub mod alert;
pub mod error;
pub mod evaluator;
pub mod limits;
pub mod reading;
pub mod types;
