pub mod config;
pub mod grading;
pub mod intake;
pub mod market;
pub mod negotiation;
pub mod orchestrator;
pub mod pricing;
pub mod store;

pub use orchestrator::{MarketDataProvider, ValuationEngine};
