//! SONOFF device portal API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! stores, background poller, email notifications) so integration tests and
//! the binary entrypoint can both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod notifications;
pub mod router;
pub mod routes;
pub mod state;
pub mod stores;
