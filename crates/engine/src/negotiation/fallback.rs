use gemval_common::types::{DiamondSpecification, ValuationResult};

/// Deterministic negotiation script used when the generative
/// collaborator is unavailable. Pure function of its inputs.
pub fn fallback_script(spec: &DiamondSpecification, result: &ValuationResult) -> String {
    let position = if result.is_overpriced { "above" } else { "within" };
    let target = (result.fair_market_value as f64 * 0.9).round() as u64;

    format!(
        "Based on our analysis of your {carat}ct {cut} diamond, here's your negotiation strategy:\n\
         \n\
         **Opening Statement:**\n\
         \"I've done extensive research on this diamond and similar ones in the current market. While I'm interested, I have some concerns about the pricing relative to comparable stones.\"\n\
         \n\
         **Key Negotiation Points:**\n\
         1. **Market Comparison**: \"Comparable diamonds are currently selling for ${min} - ${max}. This listing is {position} that range.\"\n\
         \n\
         2. **Quality Considerations**: \"The {color} color grade and {clarity} clarity, while good, show some characteristics that affect the stone's value.\"\n\
         \n\
         3. **Closing Strategy**: \"I'm prepared to make a decision today if we can work on the pricing. My research shows a fair price would be around ${target}.\"\n\
         \n\
         **Alternative Approach:**\n\
         If they won't negotiate on price, ask for additional services like free setting, extended warranty, or professional cleaning service.",
        carat = spec.carat,
        cut = spec.cut,
        min = result.price_range.min,
        max = result.price_range.max,
        position = position,
        color = spec.color,
        clarity = spec.clarity,
        target = target,
    )
}

/// Fixed pre-negotiation checklist used when the generative
/// collaborator is unavailable.
pub fn fallback_checklist() -> Vec<String> {
    vec![
        "Verify all diamond specifications match the listing".into(),
        "Ask for recent comparable sales in their inventory".into(),
        "Request to see the diamond under different lighting conditions".into(),
        "Inquire about their return/exchange policy".into(),
        "Get all agreements in writing before payment".into(),
        "Ask about certification authenticity verification".into(),
        "Research the jeweler's reputation and reviews".into(),
        "Prepare your maximum budget and walk-away price".into(),
    ]
}
