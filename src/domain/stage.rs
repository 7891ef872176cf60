//! Tracking stages and the carrier token → stage table

use crate::error::TrackingError;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;

/// Shipment milestone with an explicit rank.
///
/// Ranks 4-7 are reserved for intermediate stages; do not renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TrackingStage {
    OrderReceived = 1,
    Shipped = 2,
    InTransit = 3,
    InDelivery = 8,
    DeliveryAttempted = 9,
    Delivered = 10,
}

impl TrackingStage {
    const ALL: [TrackingStage; 6] = [
        TrackingStage::OrderReceived,
        TrackingStage::Shipped,
        TrackingStage::InTransit,
        TrackingStage::InDelivery,
        TrackingStage::DeliveryAttempted,
        TrackingStage::Delivered,
    ];

    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// All stages, lowest rank first
    pub fn sorted() -> Vec<TrackingStage> {
        let mut stages = Self::ALL.to_vec();
        stages.sort();
        stages
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStage::OrderReceived => "ORDER_RECEIVED",
            TrackingStage::Shipped => "SHIPPED",
            TrackingStage::InTransit => "IN_TRANSIT",
            TrackingStage::InDelivery => "IN_DELIVERY",
            TrackingStage::DeliveryAttempted => "DELIVERY_ATTEMPTED",
            TrackingStage::Delivered => "DELIVERED",
        }
    }
}

impl Ord for TrackingStage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for TrackingStage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<u8> for TrackingStage {
    type Error = u8;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Self::ALL.into_iter().find(|stage| stage.rank() == rank).ok_or(rank)
    }
}

impl std::fmt::Display for TrackingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UPS milestone vocabulary. `delAttpted` is the carrier's own spelling.
const UPS_STAGE_TOKENS: [(&str, TrackingStage); 6] = [
    ("cms.stapp.orderReceived", TrackingStage::OrderReceived),
    ("cms.stapp.shipped", TrackingStage::Shipped),
    ("cms.stapp.inTransit", TrackingStage::InTransit),
    ("cms.stapp.delivery", TrackingStage::InDelivery),
    ("cms.stapp.delAttpted", TrackingStage::DeliveryAttempted),
    ("cms.stapp.delivered", TrackingStage::Delivered),
];

/// Stage used when the carrier omits the milestone name
pub const DEFAULT_STAGE: TrackingStage = TrackingStage::InTransit;

/// Immutable carrier token table.
///
/// Built once at startup and shared behind an `Arc`; a different carrier
/// vocabulary means a different `StageMap`, not a mutated one.
#[derive(Debug, Clone)]
pub struct StageMap {
    tokens: FxHashMap<String, TrackingStage>,
    default_stage: TrackingStage,
}

impl StageMap {
    pub fn new<I, S>(entries: I, default_stage: TrackingStage) -> Self
    where
        I: IntoIterator<Item = (S, TrackingStage)>,
        S: Into<String>,
    {
        let tokens = entries.into_iter().map(|(token, stage)| (token.into(), stage)).collect();
        Self { tokens, default_stage }
    }

    pub fn ups() -> Self {
        Self::new(UPS_STAGE_TOKENS, DEFAULT_STAGE)
    }

    pub fn default_stage(&self) -> TrackingStage {
        self.default_stage
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Resolve a carrier token. Exact match only; an absent token is the
    /// default stage, an unknown one is an error.
    pub fn resolve(&self, token: Option<&str>) -> Result<TrackingStage, TrackingError> {
        let Some(token) = token else {
            return Ok(self.default_stage);
        };

        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| TrackingError::UnknownStage { token: token.to_string() })
    }
}

impl Default for StageMap {
    fn default() -> Self {
        Self::ups()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_sparse() {
        assert_eq!(TrackingStage::OrderReceived.rank(), 1);
        assert_eq!(TrackingStage::Shipped.rank(), 2);
        assert_eq!(TrackingStage::InTransit.rank(), 3);
        assert_eq!(TrackingStage::InDelivery.rank(), 8);
        assert_eq!(TrackingStage::DeliveryAttempted.rank(), 9);
        assert_eq!(TrackingStage::Delivered.rank(), 10);
    }

    #[test]
    fn test_ordering_follows_rank() {
        assert!(TrackingStage::InTransit < TrackingStage::InDelivery);
        assert!(TrackingStage::Delivered > TrackingStage::DeliveryAttempted);

        let ranks: Vec<u8> = TrackingStage::sorted().into_iter().map(TrackingStage::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 8, 9, 10]);
    }

    #[test]
    fn test_try_from_rank() {
        assert_eq!(TrackingStage::try_from(8), Ok(TrackingStage::InDelivery));
        assert_eq!(TrackingStage::try_from(5), Err(5));
        assert_eq!(TrackingStage::try_from(0), Err(0));
    }

    #[test]
    fn test_resolve_every_ups_token() {
        let map = StageMap::ups();
        assert_eq!(map.len(), UPS_STAGE_TOKENS.len());
        for (token, stage) in UPS_STAGE_TOKENS {
            assert_eq!(map.resolve(Some(token)).unwrap(), stage);
        }
    }

    #[test]
    fn test_resolve_absent_uses_default() {
        let map = StageMap::ups();
        assert_eq!(map.resolve(None).unwrap(), TrackingStage::InTransit);
    }

    #[test]
    fn test_resolve_unknown_token() {
        let map = StageMap::ups();
        let err = map.resolve(Some("bogus.token")).unwrap_err();
        assert!(matches!(err, TrackingError::UnknownStage { ref token } if token == "bogus.token"));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let map = StageMap::ups();
        assert!(map.resolve(Some("CMS.STAPP.SHIPPED")).is_err());
        assert!(map.resolve(Some("cms.stapp.ship")).is_err());
    }

    #[test]
    fn test_serialize_stage_name() {
        let json = serde_json::to_string(&TrackingStage::DeliveryAttempted).unwrap();
        assert_eq!(json, "\"DELIVERY_ATTEMPTED\"");
    }
}
