//! Application layer: Use cases and services.
//!
//! This module holds the prediction session controller and report
//! generation, independent of the terminal front end.

pub mod report;
mod session;

pub use session::{Effect, Event, Phase, PredictionSession, RequestId, RequestStatus, View};
