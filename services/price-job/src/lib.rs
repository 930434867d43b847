//! Pricecheck Price Job Service
//!
//! Takes an uploaded parts list (CSV or spreadsheet), validates it, looks up
//! prices for every row and records the quotes found.

pub mod app;
pub mod handlers;
pub mod lookup_client;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod service;

pub use app::{build_state, create_app, AppState, ResultSink};
pub use lookup_client::{PriceLookupClient, QuoteSource};
pub use metrics::JobMetrics;
pub use service::PriceJob;
