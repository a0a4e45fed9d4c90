use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ValuationId;
use crate::types::{DiamondSpecification, ValuationResult};

/// POST /valuations payload — one completed valuation handed to the
/// external record store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValuationRecord {
    pub id: ValuationId,
    pub specification: DiamondSpecification,
    pub result: ValuationResult,
    pub recorded_at: DateTime<Utc>,
    pub user_id: String,
}

impl ValuationRecord {
    pub fn new(
        specification: DiamondSpecification,
        result: ValuationResult,
        user_id: String,
    ) -> Self {
        Self {
            id: ValuationId::new(),
            specification,
            result,
            recorded_at: Utc::now(),
            user_id,
        }
    }
}
