use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::{DiamondSpecification, MarketDataSnapshot, PriceBand, SnapshotSource};

/// POST /market-data/query request — comparison pricing for one
/// specification bucket. Carries grading fields only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketQueryRequest {
    pub carat: f64,
    pub cut: String,
    pub color: String,
    pub clarity: String,
}

impl From<&DiamondSpecification> for MarketQueryRequest {
    fn from(spec: &DiamondSpecification) -> Self {
        Self {
            carat: spec.carat,
            cut: spec.cut.to_string(),
            color: spec.color.to_string(),
            clarity: spec.clarity.to_string(),
        }
    }
}

/// POST /market-data/query response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketQueryResponse {
    pub average_price: f64,
    #[serde(default)]
    pub price_min: f64,
    #[serde(default)]
    pub price_max: f64,
    #[serde(default)]
    pub sample_size: u32,
}

impl MarketQueryResponse {
    /// Stamp a live snapshot from the wire response.
    pub fn into_snapshot(self) -> MarketDataSnapshot {
        MarketDataSnapshot {
            average_price: self.average_price,
            price_band: PriceBand {
                min: self.price_min,
                max: self.price_max,
            },
            sample_size: self.sample_size,
            source: SnapshotSource::Live,
            timestamp: Utc::now(),
        }
    }
}
