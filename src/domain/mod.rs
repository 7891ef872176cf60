//! Domain models - tracking stages and shipment progress types
//!
//! - `TrackingStage` - ranked shipment milestone
//! - `StageMap` - carrier token → stage table
//! - `RawActivity` - untrusted carrier activity record
//! - `ProgressEvent` / `Location` - normalized output

pub mod stage;
pub mod types;

pub use stage::{StageMap, TrackingStage, DEFAULT_STAGE};
pub use types::{Location, Milestone, ProgressEvent, RawActivity};
