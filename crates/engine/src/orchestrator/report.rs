use chrono::Utc;

use gemval_common::types::{
    DiamondSpecification, EthicalSourcing, MarketComparison, MarketDataSnapshot,
    SourcingConfidence,
};

pub(crate) const BASE_CONFIDENCE: u8 = 70;
pub(crate) const MAX_CONFIDENCE: u8 = 95;
pub(crate) const FALLBACK_CONFIDENCE: u8 = 60;

/// Listing prices within this percentage of the snapshot average read
/// as "within market range".
const COMPARISON_TOLERANCE_PCT: f64 = 10.0;

/// Snapshots backed by more comparables than this earn a confidence
/// bonus.
const ROBUST_SAMPLE_SIZE: u32 = 10;

pub(crate) fn market_comparison(
    fair_market_value: u64,
    snapshot: &MarketDataSnapshot,
) -> MarketComparison {
    let average = snapshot.average_price;
    if !average.is_finite() || average <= 0.0 {
        return MarketComparison::Unavailable;
    }

    let diff_pct = (fair_market_value as f64 - average) / average * 100.0;
    if diff_pct > COMPARISON_TOLERANCE_PCT {
        MarketComparison::AboveMarketAverage
    } else if diff_pct < -COMPARISON_TOLERANCE_PCT {
        MarketComparison::BelowMarketAverage
    } else {
        MarketComparison::WithinMarketRange
    }
}

/// Buyer-facing talking points derived from the stone and its pricing.
/// Fixed order: price first, then color, clarity, cut.
pub(crate) fn negotiation_points(
    spec: &DiamondSpecification,
    fair_market_value: u64,
    is_overpriced: bool,
) -> Vec<String> {
    let mut points = Vec::new();

    if is_overpriced && fair_market_value > 0 {
        if let Some(listing) = spec.listing_price {
            let pct =
                ((listing - fair_market_value as f64) / fair_market_value as f64 * 100.0).round();
            points.push(format!(
                "This diamond is priced {}% above fair market value",
                pct
            ));
        }
    }

    if spec.color.shows_tinting() {
        points.push(format!(
            "{} color grade may show slight tinting, affecting brilliance",
            spec.color
        ));
    }

    if spec.clarity.has_visible_inclusions() {
        points.push(format!(
            "{} clarity grade includes visible inclusions that may impact appearance",
            spec.clarity
        ));
    }

    if !spec.cut.is_premium() {
        points.push("Cut quality could be optimized for better light performance".to_string());
    }

    points
}

/// Sourcing assessment. Lab-grown provenance counts as verified when
/// any certificate or sourcing information accompanies the stone.
pub(crate) fn ethical_sourcing(spec: &DiamondSpecification) -> EthicalSourcing {
    let documented = spec.certificate.is_some() || spec.sourcing_info.is_some();

    if documented {
        let certificate = spec
            .certificate
            .clone()
            .unwrap_or_else(|| format!("IGI-{}", Utc::now().timestamp_millis()));
        EthicalSourcing {
            verified: true,
            origin: "Certified Lab-Grown".to_string(),
            certificate: Some(certificate),
            confidence: SourcingConfidence::High,
            recommendation: None,
        }
    } else {
        EthicalSourcing {
            verified: false,
            origin: "Unknown".to_string(),
            certificate: None,
            confidence: SourcingConfidence::Low,
            recommendation: Some("Request certification documentation".to_string()),
        }
    }
}

/// Confidence in the valuation, 0-95. Starts from a market baseline
/// and accrues per present input; capped below certainty.
pub(crate) fn confidence_score(
    spec: &DiamondSpecification,
    snapshot: Option<&MarketDataSnapshot>,
) -> u8 {
    let mut score: u32 = BASE_CONFIDENCE as u32;

    if spec.carat.is_finite() && spec.carat > 0.0 {
        score += 5;
    }
    // Grading fields are always present on a parsed specification.
    score += 15;

    if spec.measurements.is_some() {
        score += 3;
    }
    if spec.certificate.is_some() {
        score += 7;
    }
    if snapshot.is_some_and(|s| s.sample_size > ROBUST_SAMPLE_SIZE) {
        score += 10;
    }

    score.min(MAX_CONFIDENCE as u32) as u8
}

/// Generic talking points for specification-only valuations.
pub(crate) fn fallback_points() -> Vec<String> {
    vec![
        "Request recent comparable sales data".to_string(),
        "Ask for detailed grading report".to_string(),
        "Inquire about return policy".to_string(),
    ]
}
