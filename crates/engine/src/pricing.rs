use gemval_common::types::{DiamondSpecification, MarketDataSnapshot, PriceRange};

/// Exponent weighting carat in the base price: larger stones are
/// disproportionately valuable.
const CARAT_EXPONENT: f64 = 1.8;
const BASE_PRICE_PER_CARAT: f64 = 1000.0;
/// Discount applied to every estimate; lab-grown stones trade well
/// below natural equivalents.
const LAB_GROWN_DISCOUNT: f64 = 0.70;
/// Live averages whose ratio to the computed base falls outside
/// (0.5, 2.0) are discarded rather than adopted.
const MARKET_BAND_LOW: f64 = 0.5;
const MARKET_BAND_HIGH: f64 = 2.0;
/// Half-width of the suggested offer band, and the overpriced cutoff.
const RANGE_SPREAD: f64 = 0.15;

/// Specification-derived base before market correction and discount.
/// Strictly increasing in carat for fixed grades.
pub(crate) fn base_price(spec: &DiamondSpecification) -> f64 {
    spec.carat_weight().powf(CARAT_EXPONENT)
        * BASE_PRICE_PER_CARAT
        * spec.cut.price_multiplier()
        * spec.color.price_multiplier()
        * spec.clarity.price_multiplier()
}

/// Point estimate in whole currency units. Deterministic for identical
/// specification and snapshot inputs.
pub fn fair_market_value(
    spec: &DiamondSpecification,
    snapshot: Option<&MarketDataSnapshot>,
) -> u64 {
    let mut price = base_price(spec);

    if let Some(snapshot) = snapshot {
        if snapshot.average_price > 0.0 {
            let ratio = snapshot.average_price / price;
            if ratio > MARKET_BAND_LOW && ratio < MARKET_BAND_HIGH {
                price = snapshot.average_price;
            } else {
                tracing::debug!(
                    average_price = snapshot.average_price,
                    computed_base = price,
                    "Market average outside sanity band, keeping computed base"
                );
            }
        }
    }

    round_currency(price * LAB_GROWN_DISCOUNT)
}

/// Suggested offer band of ±15% around the point estimate.
pub fn price_range(fair_market_value: u64) -> PriceRange {
    let value = fair_market_value as f64;
    PriceRange {
        min: round_currency(value * (1.0 - RANGE_SPREAD)),
        max: round_currency(value * (1.0 + RANGE_SPREAD)),
    }
}

/// A listing is overpriced only strictly above the +15% band.
pub fn is_overpriced(listing_price: Option<f64>, fair_market_value: u64) -> bool {
    match listing_price {
        Some(listing) => listing > fair_market_value as f64 * (1.0 + RANGE_SPREAD),
        None => false,
    }
}

fn round_currency(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}
