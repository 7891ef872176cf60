//! Caller-facing lookup: tracking id in, normalized timeline out

use crate::domain::types::ProgressEvent;
use crate::error::TrackingError;
use crate::io::source::ActivitySource;
use crate::services::progress::ProgressPipeline;
use tracing::{info, warn};

/// Composes a transport with the normalization pipeline.
///
/// Each lookup is all-or-nothing; failures are logged and returned, never retried.
pub struct TrackingService<S> {
    source: S,
    pipeline: ProgressPipeline,
}

impl<S: ActivitySource> TrackingService<S> {
    pub fn new(source: S, pipeline: ProgressPipeline) -> Self {
        Self { source, pipeline }
    }

    pub fn pipeline(&self) -> &ProgressPipeline {
        &self.pipeline
    }

    pub async fn fetch_and_build_progress(
        &self,
        tracking_id: &str,
    ) -> Result<Vec<ProgressEvent>, TrackingError> {
        let result = async {
            let activities = self.source.fetch_raw_activities(tracking_id).await?;
            self.pipeline.build_progress(&activities)
        }
        .await;

        match &result {
            Ok(events) => {
                info!(
                    tracking_id = %tracking_id,
                    events = events.len(),
                    latest_stage = ?events.iter().map(|e| e.stage).max(),
                    "shipment_progress_built"
                );
            }
            Err(e) => {
                warn!(tracking_id = %tracking_id, kind = e.kind(), error = %e, "shipment_progress_failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stage::TrackingStage;
    use crate::domain::types::RawActivity;
    use async_trait::async_trait;

    struct FixedSource(Result<Vec<RawActivity>, fn(&str) -> TrackingError>);

    #[async_trait]
    impl ActivitySource for FixedSource {
        async fn fetch_raw_activities(
            &self,
            tracking_id: &str,
        ) -> Result<Vec<RawActivity>, TrackingError> {
            match &self.0 {
                Ok(activities) => Ok(activities.clone()),
                Err(make_err) => Err(make_err(tracking_id)),
            }
        }
    }

    fn unknown_id(tracking_id: &str) -> TrackingError {
        TrackingError::InvalidTrackingId { tracking_id: tracking_id.to_string() }
    }

    fn timed_out(tracking_id: &str) -> TrackingError {
        TrackingError::transport(tracking_id, "timed out")
    }

    fn scan(text: &str) -> RawActivity {
        RawActivity { activity_scan: Some(text.to_string()), ..Default::default() }
    }

    #[tokio::test]
    async fn test_builds_from_source() {
        let service =
            TrackingService::new(FixedSource(Ok(vec![scan("Origin Scan")])), ProgressPipeline::ups());

        let events = service.fetch_and_build_progress("1Z111").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].stage, TrackingStage::InTransit);
        assert_eq!(events[0].description, "Origin Scan");
    }

    #[tokio::test]
    async fn test_invalid_id_propagates() {
        let service = TrackingService::new(
            FixedSource(Err(unknown_id)),
            ProgressPipeline::ups(),
        );

        let err = service.fetch_and_build_progress("1Z404").await.unwrap_err();
        assert!(matches!(err, TrackingError::InvalidTrackingId { ref tracking_id } if tracking_id == "1Z404"));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let service = TrackingService::new(
            FixedSource(Err(timed_out)),
            ProgressPipeline::ups(),
        );

        let err = service.fetch_and_build_progress("1Z500").await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
