mod report;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::Utc;

use gemval_common::api::records::ValuationRecord;
use gemval_common::types::{
    DiamondSpecification, EthicalSourcing, MarketComparison, MarketDataSnapshot, NegotiationBrief,
    SourcingConfidence, ValuationBasis, ValuationResult,
};
use gemval_common::Result;

use crate::market::MarketDataResolver;
use crate::negotiation::{fallback_checklist, fallback_script, ScriptWriter};
use crate::store::ValuationStore;
use crate::{grading, pricing};

/// Object-safe seam between the orchestrator and market-data
/// resolution. The production resolver never fails; tests inject
/// failing providers to drive the specification-only path.
pub trait MarketDataProvider: Send + Sync {
    fn market_data<'a>(
        &'a self,
        spec: &'a DiamondSpecification,
    ) -> Pin<Box<dyn Future<Output = Result<MarketDataSnapshot>> + Send + 'a>>;
}

impl MarketDataProvider for MarketDataResolver {
    fn market_data<'a>(
        &'a self,
        spec: &'a DiamondSpecification,
    ) -> Pin<Box<dyn Future<Output = Result<MarketDataSnapshot>> + Send + 'a>> {
        Box::pin(async move { Ok(self.resolve(spec).await) })
    }
}

/// Coordinates grading, pricing, market data, persistence and
/// negotiation content. `valuate` never returns an error: any internal
/// failure degrades to a complete specification-only result.
pub struct ValuationEngine {
    market: Arc<dyn MarketDataProvider>,
    writer: Option<Arc<dyn ScriptWriter>>,
    store: Option<Arc<dyn ValuationStore>>,
    user_id: String,
}

impl ValuationEngine {
    pub fn new(market: Arc<dyn MarketDataProvider>, user_id: impl Into<String>) -> Self {
        Self {
            market,
            writer: None,
            store: None,
            user_id: user_id.into(),
        }
    }

    pub fn with_writer(mut self, writer: Arc<dyn ScriptWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn ValuationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Produce a complete valuation. Infallible outward: collaborator
    /// failures downgrade the whole result to the specification-only
    /// fallback, never a partial mix of the two paths.
    pub async fn valuate(&self, spec: &DiamondSpecification) -> ValuationResult {
        match self.market_valuation(spec).await {
            Ok(result) => {
                self.persist(spec, &result);
                result
            }
            Err(error) => {
                tracing::warn!(error = %error, "Valuation degraded to specification-only fallback");
                metrics::counter!("valuation.fallback").increment(1);
                fallback_valuation(spec)
            }
        }
    }

    async fn market_valuation(&self, spec: &DiamondSpecification) -> Result<ValuationResult> {
        let snapshot = self.market.market_data(spec).await?;

        let fair_market_value = pricing::fair_market_value(spec, Some(&snapshot));
        let is_overpriced = pricing::is_overpriced(spec.listing_price, fair_market_value);

        Ok(ValuationResult {
            fair_market_value,
            quality_grade: grading::quality_grade(spec),
            is_overpriced,
            price_range: pricing::price_range(fair_market_value),
            market_comparison: report::market_comparison(fair_market_value, &snapshot),
            negotiation_points: report::negotiation_points(spec, fair_market_value, is_overpriced),
            ethical_sourcing: report::ethical_sourcing(spec),
            confidence: report::confidence_score(spec, Some(&snapshot)),
            basis: ValuationBasis::Market,
            note: None,
            last_updated: Utc::now(),
        })
    }

    /// Fire-and-forget persistence. Only market-backed results are
    /// recorded; store failures are logged and dropped.
    fn persist(&self, spec: &DiamondSpecification, result: &ValuationResult) {
        let Some(store) = self.store.clone() else {
            return;
        };

        let record = ValuationRecord::new(spec.clone(), result.clone(), self.user_id.clone());
        tokio::spawn(async move {
            if let Err(error) = store.record(record).await {
                tracing::warn!(error = %error, "Failed to record valuation");
            }
        });
    }

    /// Negotiation script and checklist for a completed valuation.
    /// Script and checklist degrade independently to template content.
    pub async fn negotiation_brief(
        &self,
        spec: &DiamondSpecification,
        result: &ValuationResult,
    ) -> NegotiationBrief {
        let Some(writer) = &self.writer else {
            return NegotiationBrief {
                script: fallback_script(spec, result),
                checklist: fallback_checklist(),
            };
        };

        let (script, checklist) = tokio::join!(
            writer.negotiation_script(spec, result),
            writer.negotiation_checklist(spec, result),
        );

        let script = script.unwrap_or_else(|error| {
            tracing::warn!(error = %error, "Script generation failed, using template");
            metrics::counter!("negotiation.fallback", "kind" => "script").increment(1);
            fallback_script(spec, result)
        });

        // An Ok but empty checklist reads as a generation failure too.
        let checklist = match checklist {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                tracing::warn!("Checklist generation returned no items, using template");
                metrics::counter!("negotiation.fallback", "kind" => "checklist").increment(1);
                fallback_checklist()
            }
            Err(error) => {
                tracing::warn!(error = %error, "Checklist generation failed, using template");
                metrics::counter!("negotiation.fallback", "kind" => "checklist").increment(1);
                fallback_checklist()
            }
        };

        NegotiationBrief { script, checklist }
    }
}

/// Self-contained valuation computed from the specification alone.
/// Used whenever the market path fails for any reason. Without market
/// context there is no overpricing call to make, and sourcing is left
/// unverified.
pub fn fallback_valuation(spec: &DiamondSpecification) -> ValuationResult {
    let fair_market_value = pricing::fair_market_value(spec, None);

    ValuationResult {
        fair_market_value,
        quality_grade: grading::quality_grade(spec),
        is_overpriced: false,
        price_range: pricing::price_range(fair_market_value),
        market_comparison: MarketComparison::SpecificationEstimate,
        negotiation_points: report::fallback_points(),
        ethical_sourcing: EthicalSourcing {
            verified: false,
            origin: "Unknown - verification required".to_string(),
            certificate: None,
            confidence: SourcingConfidence::Low,
            recommendation: None,
        },
        confidence: report::FALLBACK_CONFIDENCE,
        basis: ValuationBasis::SpecificationOnly,
        note: Some("Valuation based on specifications only - market data unavailable".to_string()),
        last_updated: Utc::now(),
    }
}
