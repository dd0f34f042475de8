//! Prediction port: Trait for the remote risk prediction service.
//!
//! This trait abstracts the HTTP transport from the application logic.

use crate::domain::{HealthParameters, PredictionResult};

/// Failure of a prediction call.
///
/// All variants are treated the same way by the UI; the distinction
/// exists for logging.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection refused, timeout, DNS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("Prediction service returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Body was not JSON or lacked required fields
    #[error("Invalid prediction response: {0}")]
    Parse(String),
}

/// Trait for prediction backends.
///
/// Implementations perform exactly one request per call: no retry and
/// no caching of results across calls.
pub trait PredictionService: Send + Sync {
    /// Submit parameters and wait for the assessment.
    ///
    /// # Errors
    /// Returns `TransportError` on network failure, non-2xx status or an
    /// unparseable response.
    fn predict(&self, params: &HealthParameters) -> Result<PredictionResult, TransportError>;

    /// Where requests are sent, for display.
    fn endpoint(&self) -> &str;
}
