use std::future::Future;
use std::pin::Pin;

use gemval_common::api::market::{MarketQueryRequest, MarketQueryResponse};
use gemval_common::types::MarketDataSnapshot;

use super::{MarketError, MarketSource};

/// HTTP client for the live market-data service.
pub struct HttpMarketSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMarketSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn query_once(
        &self,
        request: &MarketQueryRequest,
    ) -> Result<MarketDataSnapshot, MarketError> {
        let start = std::time::Instant::now();
        let url = format!("{}/market-data/query", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| MarketError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::Api(format!("{}: {}", status, body)));
        }

        let body: MarketQueryResponse = response
            .json()
            .await
            .map_err(|e| MarketError::Parse(format!("Failed to parse market response: {}", e)))?;

        metrics::histogram!("market.request.latency").record(start.elapsed().as_secs_f64());

        Ok(body.into_snapshot())
    }
}

impl MarketSource for HttpMarketSource {
    fn query<'a>(
        &'a self,
        request: &'a MarketQueryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<MarketDataSnapshot, MarketError>> + Send + 'a>> {
        Box::pin(self.query_once(request))
    }
}
