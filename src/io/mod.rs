//! IO modules - carrier transport
//!
//! - `source` - `ActivitySource` trait and response path extraction
//! - `ups` - HTTP client for the UPS web tracking endpoint

pub mod source;
pub mod ups;

pub use source::{extract_activities, ActivitySource};
pub use ups::UpsHttpClient;
