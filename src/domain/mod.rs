//! Domain layer: Core types for diabetes risk assessment.
//!
//! This module contains pure Rust types with no I/O.
//! Parameter types implement strict validation.

mod notification;
pub mod parameters;
mod prediction;

pub use notification::{Notification, NotificationVariant};
pub use parameters::{
    FieldEdit, FieldError, FieldInput, FieldSpec, HealthParameters, ParameterField, ParameterForm,
    ValidationError,
};
pub use prediction::{Confidence, Outcome, PredictionResult};
