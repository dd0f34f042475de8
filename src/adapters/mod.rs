//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the prediction service
//! - `sanitize`: health-value filtering for logs

pub mod http;
pub mod sanitize;

pub use http::HttpPredictionClient;
