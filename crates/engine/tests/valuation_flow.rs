//! End-to-end valuation flow through the public engine surface.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use gemval_common::types::{
    Clarity, Color, Cut, DiamondSpecification, MarketComparison, MarketDataSnapshot, PriceBand,
    QualityGrade, SnapshotSource, ValuationBasis,
};
use gemval_common::{GemvalError, Result};
use gemval_engine::store::{MemoryStore, ValuationStore};
use gemval_engine::{MarketDataProvider, ValuationEngine};

struct StubMarket {
    snapshot: Option<MarketDataSnapshot>,
}

impl StubMarket {
    fn live(average: f64) -> Self {
        Self {
            snapshot: Some(MarketDataSnapshot {
                average_price: average,
                price_band: PriceBand {
                    min: average * 0.8,
                    max: average * 1.2,
                },
                sample_size: 45,
                source: SnapshotSource::Live,
                timestamp: Utc::now(),
            }),
        }
    }

    fn broken() -> Self {
        Self { snapshot: None }
    }
}

impl MarketDataProvider for StubMarket {
    fn market_data<'a>(
        &'a self,
        _spec: &'a DiamondSpecification,
    ) -> Pin<Box<dyn Future<Output = Result<MarketDataSnapshot>> + Send + 'a>> {
        let snapshot = self.snapshot.clone();
        Box::pin(async move {
            snapshot.ok_or_else(|| GemvalError::MarketData("service unreachable".into()))
        })
    }
}

fn reference_stone() -> DiamondSpecification {
    DiamondSpecification::new(1.0, Cut::Round, Color::G, Clarity::VS1)
}

#[tokio::test]
async fn market_backed_valuation_end_to_end() {
    let engine = ValuationEngine::new(Arc::new(StubMarket::live(1100.0)), "integration");
    let result = engine.valuate(&reference_stone()).await;

    // 1100 is within the sanity band of the computed base, so it is
    // adopted and discounted: 1100 * 0.70 = 770.
    assert_eq!(result.fair_market_value, 770);
    assert_eq!(result.quality_grade, QualityGrade::Excellent);
    assert_eq!(result.basis, ValuationBasis::Market);
    assert_eq!(result.price_range.min, 655);
    assert_eq!(result.price_range.max, 886);
    assert!(!result.is_overpriced);
    assert!(result.note.is_none());
    assert!(result.confidence > 60);
}

#[tokio::test]
async fn specification_only_valuation_end_to_end() {
    let engine = ValuationEngine::new(Arc::new(StubMarket::broken()), "integration");
    let result = engine.valuate(&reference_stone()).await;

    // Base path: 1.0^1.8 * 1000 * 1.10 * 1.05 * 1.05 * 0.70 = 848.925.
    assert_eq!(result.fair_market_value, 849);
    assert_eq!(result.basis, ValuationBasis::SpecificationOnly);
    assert_eq!(result.confidence, 60);
    assert_eq!(
        result.market_comparison,
        MarketComparison::SpecificationEstimate
    );
    assert_eq!(result.negotiation_points.len(), 3);
    assert_eq!(result.price_range.min, 722);
    assert_eq!(result.price_range.max, 976);
    assert!(result
        .note
        .as_deref()
        .is_some_and(|n| n.contains("market data unavailable")));
}

#[tokio::test]
async fn successful_valuations_are_recorded() {
    let store = Arc::new(MemoryStore::new());
    let engine = ValuationEngine::new(Arc::new(StubMarket::live(1100.0)), "integration")
        .with_store(store.clone());

    let result = engine.valuate(&reference_stone()).await;

    // Recording is spawned; give it a beat to land.
    tokio::time::sleep(Duration::from_millis(20)).await;

    let records = store.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, "integration");
    assert_eq!(records[0].result.fair_market_value, result.fair_market_value);
}

#[tokio::test]
async fn degraded_valuations_are_not_recorded() {
    let store = Arc::new(MemoryStore::new());
    let engine = ValuationEngine::new(Arc::new(StubMarket::broken()), "integration")
        .with_store(store.clone());

    engine.valuate(&reference_stone()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(store.records().await.is_empty());
}

#[tokio::test]
async fn brief_falls_back_without_generative_writer() {
    let engine = ValuationEngine::new(Arc::new(StubMarket::live(1100.0)), "integration");
    let spec = reference_stone();
    let result = engine.valuate(&spec).await;

    let brief = engine.negotiation_brief(&spec, &result).await;
    assert!(brief.script.contains("1ct Round diamond"));
    assert!(brief.script.contains(&format!("${}", result.price_range.min)));
    assert_eq!(brief.checklist.len(), 8);
}

#[tokio::test]
async fn overpriced_listing_is_flagged() {
    let engine = ValuationEngine::new(Arc::new(StubMarket::live(1100.0)), "integration");
    let mut spec = reference_stone();
    // Fair value is 770; the overpriced cutoff sits at 885.5.
    spec.listing_price = Some(900.0);

    let result = engine.valuate(&spec).await;
    assert!(result.is_overpriced);
    assert!(result.negotiation_points[0].contains("above fair market value"));
}
