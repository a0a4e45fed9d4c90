use serde::{Deserialize, Serialize};

/// Top-level system configuration, deserialized from gemval.toml.
/// Every section has full defaults so the engine runs unconfigured.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub market: MarketConfig,
    pub cache: CacheConfig,
    pub negotiation: NegotiationConfig,
    pub persistence: PersistenceConfig,
}

/// Live market-data source parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Base URL of the market-data service.
    pub base_url: String,
    /// Bounded wait for a live quote before synthetic generation.
    pub timeout_ms: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".into(),
            timeout_ms: 5_000,
        }
    }
}

/// Cache TTL configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Market snapshot cache TTL in seconds.
    pub market_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            market_ttl_seconds: 300,
        }
    }
}

/// Generative negotiation-content parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Provider name ("openai").
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Max tokens in the response.
    pub max_tokens: u32,
    /// Temperature (0.0–1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            max_tokens: 1_000,
            temperature: Some(0.7),
        }
    }
}

/// Valuation record-keeping parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Base URL of the record store. Unset disables persistence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// User attribution written on stored records.
    pub user_id: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_id: "anonymous".into(),
        }
    }
}
