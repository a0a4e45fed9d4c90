use thiserror::Error;

/// Top-level error type for valuation operations.
#[derive(Debug, Error)]
pub enum GemvalError {
    // --- Collaborator errors (engine degrades) ---
    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Text generation error: {0}")]
    TextGen(String),

    #[error("Valuation store error: {0}")]
    Store(String),

    #[error("Image intake error: {0}")]
    Intake(String),

    // --- Operational errors ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("{0}")]
    Internal(String),
}

impl GemvalError {
    /// Whether this error came from an external collaborator. The
    /// orchestrator degrades to a deterministic fallback for these
    /// instead of surfacing them to the caller.
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            Self::MarketData(_) | Self::TextGen(_) | Self::Store(_) | Self::Intake(_)
        )
    }
}

/// Result type alias for valuation operations.
pub type Result<T> = std::result::Result<T, GemvalError>;
