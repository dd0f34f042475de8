//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - Home screen with background on diabetes
//! - Health parameter form with range validation
//! - Assessment result view

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
pub use worker::{PredictionCompleted, PredictionWorker, PredictionWorkerHandle};
