//! UPS shipment tracking library
//!
//! Fetches raw carrier activity records and normalizes them into a typed,
//! ordered shipment progress timeline.

pub mod domain;
pub mod error;
pub mod infra;
pub mod io;
pub mod services;

pub use error::TrackingError;
