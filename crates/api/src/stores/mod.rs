//! In-memory application stores.
//!
//! All portal state is process-lifetime only: one OAuth session, the
//! per-device alert bounds, and the active alerts. Each store is a small
//! manager with interior locking, designed to be wrapped in `Arc` and
//! shared between the HTTP handlers and the background poller.

pub mod alerts;
pub mod limits;
pub mod session;
