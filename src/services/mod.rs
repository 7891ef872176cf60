//! Services - normalization pipeline and the caller-facing lookup
//!
//! - `timestamp` - carrier date/time parsing
//! - `location` - free-text location parsing and country canonicalization
//! - `progress` - raw activities to ordered `ProgressEvent`s
//! - `tracker` - fetch + normalize for one tracking id

pub mod location;
pub mod progress;
pub mod timestamp;
pub mod tracker;

pub use location::{parse_location, CountryReference};
pub use progress::ProgressPipeline;
pub use timestamp::{parse_timestamp, DATE_TIME_FORMAT};
pub use tracker::TrackingService;
