use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall quality label derived from the four grading scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    Exceptional,
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Exceptional => "Exceptional",
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
        };
        f.write_str(label)
    }
}

/// How the estimate sits against observed market pricing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketComparison {
    #[serde(rename = "Above market average")]
    AboveMarketAverage,
    #[serde(rename = "Below market average")]
    BelowMarketAverage,
    #[serde(rename = "Within market range")]
    WithinMarketRange,
    #[serde(rename = "Market data unavailable")]
    Unavailable,
    #[serde(rename = "Estimated based on specifications")]
    SpecificationEstimate,
}

impl fmt::Display for MarketComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AboveMarketAverage => "Above market average",
            Self::BelowMarketAverage => "Below market average",
            Self::WithinMarketRange => "Within market range",
            Self::Unavailable => "Market data unavailable",
            Self::SpecificationEstimate => "Estimated based on specifications",
        };
        f.write_str(label)
    }
}

/// Which path produced a result: the full market-backed computation or
/// the self-contained specification-only fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationBasis {
    Market,
    SpecificationOnly,
}

/// Confidence level for an ethical-sourcing determination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourcingConfidence {
    High,
    Low,
}

/// Ethical-sourcing determination for a stone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EthicalSourcing {
    pub verified: bool,
    pub origin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    pub confidence: SourcingConfidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Suggested offer band around the fair market value, in whole
/// currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

/// Complete valuation report. Immutable after construction; persisted
/// by an external record store, never by the engine itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValuationResult {
    pub fair_market_value: u64,
    pub quality_grade: QualityGrade,
    pub is_overpriced: bool,
    pub price_range: PriceRange,
    pub market_comparison: MarketComparison,
    pub negotiation_points: Vec<String>,
    pub ethical_sourcing: EthicalSourcing,
    /// Heuristic completeness score in [0, 95], not a statistical
    /// confidence interval.
    pub confidence: u8,
    pub basis: ValuationBasis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Negotiation script and preparation checklist for one valuation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiationBrief {
    pub script: String,
    pub checklist: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_labels() {
        assert_eq!(
            serde_json::to_string(&MarketComparison::SpecificationEstimate).unwrap(),
            "\"Estimated based on specifications\""
        );
        assert_eq!(
            MarketComparison::AboveMarketAverage.to_string(),
            "Above market average"
        );
    }

    #[test]
    fn test_quality_grade_label() {
        assert_eq!(QualityGrade::VeryGood.to_string(), "Very Good");
        assert_eq!(
            serde_json::to_string(&QualityGrade::VeryGood).unwrap(),
            "\"Very Good\""
        );
    }
}
