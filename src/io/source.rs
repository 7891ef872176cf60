//! Transport seam between the carrier endpoint and the normalization core

use crate::domain::types::RawActivity;
use crate::error::TrackingError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Anything that can hand back the raw activity list for a tracking id
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch_raw_activities(&self, tracking_id: &str)
        -> Result<Vec<RawActivity>, TrackingError>;
}

/// Pull `trackDetails[0].shipmentProgressActivities` out of a status response.
///
/// A missing path, `null` or anything other than a list means the carrier has
/// no data for this id. Each element is decoded on its own so a badly shaped
/// record is reported with its index and raw JSON.
pub fn extract_activities(tracking_id: &str, body: Value) -> Result<Vec<RawActivity>, TrackingError> {
    let activities = body
        .get("trackDetails")
        .and_then(|details| details.get(0))
        .and_then(|detail| detail.get("shipmentProgressActivities"))
        .and_then(Value::as_array)
        .ok_or_else(|| TrackingError::InvalidTrackingId { tracking_id: tracking_id.to_string() })?;

    activities
        .iter()
        .enumerate()
        .map(|(index, item)| {
            RawActivity::deserialize(item).map_err(|source| TrackingError::ActivityDecode {
                index,
                raw: item.to_string(),
                source,
            })
        })
        .collect()
}
