//! # Glycocheck
//!
//! Terminal client for a remote diabetes-risk prediction service.
//!
//! This crate provides:
//! - Validated entry of the eight health parameters the model consumes
//! - A JSON-over-HTTP client for the service's `/predict` endpoint
//! - Terminal UI for entering parameters and reviewing the assessment
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (HealthParameters, PredictionResult, Notification)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (reqwest, log sanitization)
//! - `application`: The prediction session controller and reports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{HealthParameters, PredictionResult};

/// Result type for Glycocheck operations
pub type Result<T> = std::result::Result<T, GlycocheckError>;

/// Main error type for Glycocheck
#[derive(Debug, thiserror::Error)]
pub enum GlycocheckError {
    #[error("Prediction request failed: {0}")]
    Transport(#[from] ports::TransportError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
