use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a snapshot came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    Live,
    Synthetic,
}

/// Observed or estimated spread of comparable sale prices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

/// Comparison pricing for one specification bucket. Created per
/// request and owned by the resolver's cache; never mutated after
/// construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketDataSnapshot {
    pub average_price: f64,
    pub price_band: PriceBand,
    pub sample_size: u32,
    pub source: SnapshotSource,
    pub timestamp: DateTime<Utc>,
}
