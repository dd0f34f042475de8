//! Prediction result types.
//!
//! Represents the assessment returned by the remote prediction service.

use serde::Deserialize;

/// Confidence label computed by the prediction service.
///
/// Unknown labels are kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Confidence {
    Low,
    Moderate,
    High,
    Other(String),
}

impl From<String> for Confidence {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => Self::Low,
            "Moderate" => Self::Moderate,
            "High" => Self::High,
            _ => Self::Other(value),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => f.write_str("Low"),
            Self::Moderate => f.write_str("Moderate"),
            Self::High => f.write_str("High"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Binary outcome of the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NonDiabetic,
    Diabetic,
}

impl Outcome {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NonDiabetic => "Non-Diabetic",
            Self::Diabetic => "Diabetic",
        }
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::NonDiabetic => "Indicators suggest negative for diabetes",
            Self::Diabetic => "Indicators suggest positive for diabetes",
        }
    }

    /// Plain-language explanation of what the outcome means.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::NonDiabetic => {
                "Based on your parameters, our model indicates low risk of diabetes. \
                 However, maintaining a healthy lifestyle is always beneficial."
            }
            Self::Diabetic => {
                "Based on your parameters, our model indicates a risk of diabetes. \
                 It's recommended to consult with a healthcare professional."
            }
        }
    }
}

/// Assessment returned by a successful prediction call.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Binary prediction (0 = non-diabetic, 1 = diabetic)
    pub prediction: u8,

    /// Probability of diabetes (0.0 to 1.0)
    pub probability: f64,

    pub confidence: Confidence,
}

impl PredictionResult {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.prediction == 1 {
            Outcome::Diabetic
        } else {
            Outcome::NonDiabetic
        }
    }

    /// Probability of diabetes as a percentage.
    #[must_use]
    pub fn positive_percent(&self) -> f64 {
        self.probability * 100.0
    }

    /// Probability of no diabetes as a percentage.
    #[must_use]
    pub fn negative_percent(&self) -> f64 {
        (1.0 - self.probability) * 100.0
    }

    /// e.g. `73.00%`
    #[must_use]
    pub fn positive_display(&self) -> String {
        format!("{:.2}%", self.positive_percent())
    }

    /// e.g. `27.00%`
    #[must_use]
    pub fn negative_display(&self) -> String {
        format!("{:.2}%", self.negative_percent())
    }
}
