mod cache;
mod client;
mod synthetic;

pub use cache::SnapshotCache;
pub use client::HttpMarketSource;
pub use synthetic::synthetic_snapshot;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{Mutex, RwLock};

use gemval_common::api::market::MarketQueryRequest;
use gemval_common::types::{DiamondSpecification, MarketDataSnapshot};

/// Errors from the live market-data source.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Market HTTP error: {0}")]
    Http(String),

    #[error("Market API error: {0}")]
    Api(String),

    #[error("Market response parse error: {0}")]
    Parse(String),

    #[error("Market query timed out after {0:?}")]
    Timeout(Duration),
}

impl From<MarketError> for gemval_common::GemvalError {
    fn from(e: MarketError) -> Self {
        gemval_common::GemvalError::MarketData(e.to_string())
    }
}

/// Object-safe seam over the live source (dyn dispatch).
/// Tests provide counting/failing mocks; production uses HttpMarketSource.
pub trait MarketSource: Send + Sync {
    fn query<'a>(
        &'a self,
        request: &'a MarketQueryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<MarketDataSnapshot, MarketError>> + Send + 'a>>;
}

/// Resolves comparison pricing for a specification bucket: cache
/// first, then the live source under a bounded wait, then synthetic
/// generation. Always returns a snapshot; never raises to the caller.
pub struct MarketDataResolver {
    source: Arc<dyn MarketSource>,
    cache: RwLock<SnapshotCache>,
    rng: Mutex<StdRng>,
    timeout: Duration,
}

impl MarketDataResolver {
    pub fn new(source: Arc<dyn MarketSource>, ttl: Duration, timeout: Duration) -> Self {
        Self::with_rng(source, ttl, timeout, StdRng::from_entropy())
    }

    /// Deterministic synthetic generation for tests.
    pub fn with_seed(
        source: Arc<dyn MarketSource>,
        ttl: Duration,
        timeout: Duration,
        seed: u64,
    ) -> Self {
        Self::with_rng(source, ttl, timeout, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        source: Arc<dyn MarketSource>,
        ttl: Duration,
        timeout: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            source,
            cache: RwLock::new(SnapshotCache::new(ttl)),
            rng: Mutex::new(rng),
            timeout,
        }
    }

    pub async fn resolve(&self, spec: &DiamondSpecification) -> MarketDataSnapshot {
        let key = spec.bucket_key();

        {
            let cache = self.cache.read().await;
            if let Some(snapshot) = cache.get(&key) {
                return snapshot;
            }
        }

        let request = MarketQueryRequest::from(spec);
        let error = match tokio::time::timeout(self.timeout, self.source.query(&request)).await {
            Ok(Ok(snapshot)) => {
                let mut cache = self.cache.write().await;
                cache.insert(key, snapshot.clone());
                return snapshot;
            }
            Ok(Err(e)) => e,
            Err(_) => MarketError::Timeout(self.timeout),
        };

        // Synthetic snapshots are cheap to regenerate and carry no
        // long-term validity, so they are never cached.
        tracing::warn!(error = %error, bucket = %spec.bucket_key(), "Live market query failed, generating synthetic data");
        metrics::counter!("market.synthetic.generated").increment(1);
        let mut rng = self.rng.lock().await;
        synthetic::synthetic_snapshot(spec, &mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gemval_common::types::{Clarity, Color, Cut, PriceBand, SnapshotSource};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MarketSource for CountingSource {
        fn query<'a>(
            &'a self,
            _request: &'a MarketQueryRequest,
        ) -> Pin<Box<dyn Future<Output = Result<MarketDataSnapshot, MarketError>> + Send + 'a>>
        {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    Err(MarketError::Http("connection refused".into()))
                } else {
                    Ok(MarketDataSnapshot {
                        average_price: 1100.0,
                        price_band: PriceBand {
                            min: 880.0,
                            max: 1320.0,
                        },
                        sample_size: 40,
                        source: SnapshotSource::Live,
                        timestamp: Utc::now(),
                    })
                }
            })
        }
    }

    fn spec() -> DiamondSpecification {
        DiamondSpecification::new(1.0, Cut::Round, Color::G, Clarity::VS1)
    }

    #[tokio::test]
    async fn test_cache_avoids_second_live_call() {
        let source = Arc::new(CountingSource::new(false));
        let resolver = MarketDataResolver::with_seed(
            source.clone(),
            Duration::from_secs(300),
            Duration::from_secs(1),
            1,
        );

        let first = resolver.resolve(&spec()).await;
        let second = resolver.resolve(&spec()).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(first.average_price, second.average_price);
        assert_eq!(second.source, SnapshotSource::Live);
    }

    #[tokio::test]
    async fn test_expired_entry_requeries_live_source() {
        let source = Arc::new(CountingSource::new(false));
        let resolver = MarketDataResolver::with_seed(
            source.clone(),
            Duration::from_millis(20),
            Duration::from_secs(1),
            1,
        );

        resolver.resolve(&spec()).await;
        resolver.resolve(&spec()).await;
        assert_eq!(source.calls(), 1);

        tokio::time::sleep(Duration::from_millis(40)).await;
        resolver.resolve(&spec()).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_yields_synthetic_and_is_not_cached() {
        let source = Arc::new(CountingSource::new(true));
        let resolver = MarketDataResolver::with_seed(
            source.clone(),
            Duration::from_secs(300),
            Duration::from_secs(1),
            9,
        );

        let center = crate::pricing::fair_market_value(&spec(), None) as f64;

        let first = resolver.resolve(&spec()).await;
        assert_eq!(first.source, SnapshotSource::Synthetic);
        assert!(first.average_price > center * 0.9 && first.average_price < center * 1.1);
        assert!((10..60).contains(&first.sample_size));

        // Synthetic results are regenerated on every miss.
        let second = resolver.resolve(&spec()).await;
        assert_eq!(second.source, SnapshotSource::Synthetic);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_slow_source_times_out_to_synthetic() {
        struct SlowSource;

        impl MarketSource for SlowSource {
            fn query<'a>(
                &'a self,
                _request: &'a MarketQueryRequest,
            ) -> Pin<Box<dyn Future<Output = Result<MarketDataSnapshot, MarketError>> + Send + 'a>>
            {
                Box::pin(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Err(MarketError::Http("unreachable".into()))
                })
            }
        }

        let resolver = MarketDataResolver::with_seed(
            Arc::new(SlowSource),
            Duration::from_secs(300),
            Duration::from_millis(10),
            3,
        );

        let snapshot = resolver.resolve(&spec()).await;
        assert_eq!(snapshot.source, SnapshotSource::Synthetic);
    }
}
