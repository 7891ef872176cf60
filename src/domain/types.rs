//! Raw carrier records and the normalized progress types

use crate::domain::stage::TrackingStage;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of `shipmentProgressActivities` as the carrier sends it.
///
/// Untrusted: every field may be missing or `null`, unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub activity_scan: Option<String>,
}

impl RawActivity {
    /// Milestone token, absent when either the milestone or its name is missing
    pub fn milestone_name(&self) -> Option<&str> {
        self.milestone.as_ref().and_then(|m| m.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub country: Option<String>,
    pub city: Option<String>,
}

impl Location {
    pub fn unknown() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => write!(f, "{}, {}", city, country),
            (None, Some(country)) => f.write_str(country),
            (Some(city), None) => f.write_str(city),
            (None, None) => f.write_str("-"),
        }
    }
}

/// One normalized milestone of a shipment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEvent {
    pub stage: TrackingStage,
    pub timestamp: Option<NaiveDateTime>,
    pub location: Location,
    pub description: String,
}
