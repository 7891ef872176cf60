//! Error taxonomy for a single tracking lookup
//!
//! Every variant is fatal to the lookup in progress. Nothing here is retried
//! or downgraded; the variant carries enough context (token, raw string,
//! tracking id) to diagnose the failure without fetching again.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackingError {
    /// Carrier returned a milestone token missing from the stage map
    #[error("unknown stage token: {token}")]
    UnknownStage { token: String },

    /// Date and time were both present but did not match `%m/%d/%Y %I:%M%p`
    #[error("timestamp {raw:?} does not match month/day/year hour:minute AM|PM: {source}")]
    TimestampParse {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("activity {index} is missing required field {field}")]
    MalformedActivity { index: usize, field: &'static str },

    /// An activity record is present but one of its fields has the wrong shape
    #[error("activity {index} could not be decoded from {raw}: {source}")]
    ActivityDecode {
        index: usize,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The carrier answered, but holds no activity list for this id
    #[error("carrier has no tracking data for {tracking_id}")]
    InvalidTrackingId { tracking_id: String },

    #[error("transport failure while tracking {tracking_id}: {source}")]
    Transport {
        tracking_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TrackingError {
    pub fn transport(
        tracking_id: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        TrackingError::Transport { tracking_id: tracking_id.to_string(), source: source.into() }
    }

    /// True when the carrier response parsed but its contents no longer match
    /// the vocabulary or formats we understand.
    pub fn is_upstream_format_change(&self) -> bool {
        matches!(
            self,
            TrackingError::UnknownStage { .. }
                | TrackingError::TimestampParse { .. }
                | TrackingError::MalformedActivity { .. }
                | TrackingError::ActivityDecode { .. }
        )
    }

    /// Short machine-friendly name used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            TrackingError::UnknownStage { .. } => "unknown_stage",
            TrackingError::TimestampParse { .. } => "timestamp_parse",
            TrackingError::MalformedActivity { .. } => "malformed_activity",
            TrackingError::ActivityDecode { .. } => "activity_decode",
            TrackingError::InvalidTrackingId { .. } => "invalid_tracking_id",
            TrackingError::Transport { .. } => "transport",
        }
    }
}
