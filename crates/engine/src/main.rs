use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;

use gemval_common::types::{DiamondSpecification, NegotiationBrief, ValuationResult};
use gemval_engine::config;
use gemval_engine::market::{HttpMarketSource, MarketDataResolver};
use gemval_engine::negotiation::OpenAiScriptWriter;
use gemval_engine::store::HttpValuationStore;
use gemval_engine::ValuationEngine;

/// Shared application state accessible from axum handlers.
struct AppState {
    engine: ValuationEngine,
    metrics_handle: PrometheusHandle,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Gemval Engine starting");

    // Load configuration — fail loudly on misconfiguration.
    let config_path = std::env::var("GEMVAL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config/gemval.toml"));

    let system = match config::load_config(&config_path) {
        Ok(system) => system,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration — refusing to start");
            std::process::exit(1);
        }
    };

    // Install Prometheus metrics recorder.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    let resolver = MarketDataResolver::new(
        Arc::new(HttpMarketSource::new(system.market.base_url.clone())),
        Duration::from_secs(system.cache.market_ttl_seconds),
        Duration::from_millis(system.market.timeout_ms),
    );

    let mut engine = ValuationEngine::new(Arc::new(resolver), system.persistence.user_id.clone());

    // Generative negotiation content is optional; missing API key
    // leaves the template fallback in place.
    if let Some(writer) = OpenAiScriptWriter::new(system.negotiation.clone()) {
        engine = engine.with_writer(Arc::new(writer));
    }

    if let Some(base_url) = system.persistence.base_url.clone() {
        engine = engine.with_store(Arc::new(HttpValuationStore::new(base_url)));
    }

    let state = Arc::new(AppState {
        engine,
        metrics_handle,
    });

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/valuations", post(valuate_handler))
        .route("/valuations/report", post(report_handler))
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "Gemval Engine listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}

/// Health check endpoint. The engine has no hard dependencies to
/// probe; reachability is the signal.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}

/// Prometheus metrics endpoint.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}

/// Valuation endpoint. Never fails: the engine degrades internally.
async fn valuate_handler(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<DiamondSpecification>,
) -> Json<ValuationResult> {
    metrics::counter!("valuation.requests").increment(1);
    Json(state.engine.valuate(&spec).await)
}

#[derive(Serialize)]
struct ValuationReport {
    result: ValuationResult,
    brief: NegotiationBrief,
}

/// Full report: valuation plus negotiation script and checklist.
async fn report_handler(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<DiamondSpecification>,
) -> Json<ValuationReport> {
    metrics::counter!("valuation.report.requests").increment(1);
    let result = state.engine.valuate(&spec).await;
    let brief = state.engine.negotiation_brief(&spec, &result).await;
    Json(ValuationReport { result, brief })
}
