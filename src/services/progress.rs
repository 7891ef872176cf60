//! Shipment progress pipeline - raw carrier activities to `ProgressEvent`s
//!
//! Carrier order is authoritative: events come out in input order, never
//! sorted by stage or time. The first bad activity aborts the whole build.

use crate::domain::stage::StageMap;
use crate::domain::types::{ProgressEvent, RawActivity};
use crate::error::TrackingError;
use crate::services::location::{parse_location, CountryReference};
use crate::services::timestamp::parse_timestamp;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProgressPipeline {
    stages: Arc<StageMap>,
    countries: Arc<CountryReference>,
}

impl ProgressPipeline {
    pub fn new(stages: Arc<StageMap>, countries: Arc<CountryReference>) -> Self {
        Self { stages, countries }
    }

    /// UPS vocabulary with the ISO 3166 country table
    pub fn ups() -> Self {
        Self::new(Arc::new(StageMap::ups()), Arc::new(CountryReference::iso3166()))
    }

    pub fn stages(&self) -> &StageMap {
        &self.stages
    }

    /// Normalize a single activity; `index` is its position in the carrier list
    pub fn normalize(
        &self,
        index: usize,
        activity: &RawActivity,
    ) -> Result<ProgressEvent, TrackingError> {
        let stage = self.stages.resolve(activity.milestone_name())?;
        let timestamp = parse_timestamp(activity.date.as_deref(), activity.time.as_deref())?;
        let location = parse_location(activity.location.as_deref(), &self.countries);
        let description = activity
            .activity_scan
            .clone()
            .ok_or(TrackingError::MalformedActivity { index, field: "activityScan" })?;

        Ok(ProgressEvent { stage, timestamp, location, description })
    }

    /// Lazily normalize activities in order
    pub fn events<'a>(
        &'a self,
        activities: &'a [RawActivity],
    ) -> impl Iterator<Item = Result<ProgressEvent, TrackingError>> + 'a {
        activities.iter().enumerate().map(move |(index, activity)| self.normalize(index, activity))
    }

    /// Normalize every activity or fail on the first one that cannot be
    pub fn build_progress(
        &self,
        activities: &[RawActivity],
    ) -> Result<Vec<ProgressEvent>, TrackingError> {
        let events = self.events(activities).collect::<Result<Vec<_>, _>>()?;
        debug!(activities = activities.len(), events = events.len(), "progress_built");
        Ok(events)
    }
}

impl Default for ProgressPipeline {
    fn default() -> Self {
        Self::ups()
    }
}
