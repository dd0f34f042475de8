//! Plain-text assessment reports.
//!
//! A report captures the parameters that were submitted, the returned
//! assessment and its interpretation, so the result can be kept or
//! printed outside the terminal.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::parameters::format_value;
use crate::domain::{HealthParameters, ParameterField, PredictionResult};
use crate::Result;

pub const DISCLAIMER: &str =
    "This prediction tool is for educational purposes only and should not replace professional medical advice.";

/// A single assessment, formatted as plain text by its `Display` impl.
pub struct Report<'a> {
    pub params: &'a HealthParameters,
    pub result: &'a PredictionResult,
    pub generated_at: DateTime<Utc>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.result.outcome();

        writeln!(f, "Diabetes Risk Assessment Results")?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f)?;
        writeln!(f, "Health Parameters")?;
        for field in ParameterField::ALL {
            let spec = field.spec();
            let value = format_value(self.params.get(field), spec.decimals);
            if spec.unit.is_empty() {
                writeln!(f, "  {:<28} {}", spec.label, value)?;
            } else {
                writeln!(f, "  {:<28} {} {}", spec.label, value, spec.unit)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Prediction: {}", outcome.label())?;
        writeln!(f, "  {}", outcome.headline())?;
        writeln!(f, "Probability of Diabetes:     {}", self.result.positive_display())?;
        writeln!(f, "Probability of Non-Diabetes: {}", self.result.negative_display())?;
        writeln!(f, "Confidence Level:            {}", self.result.confidence)?;
        writeln!(f)?;
        writeln!(f, "What does this mean?")?;
        writeln!(f, "  {}", outcome.advice())?;
        writeln!(f)?;
        writeln!(f, "{DISCLAIMER}")
    }
}

/// Render a report as text.
#[must_use]
pub fn render_report(
    params: &HealthParameters,
    result: &PredictionResult,
    generated_at: DateTime<Utc>,
) -> String {
    Report {
        params,
        result,
        generated_at,
    }
    .to_string()
}

/// Write a timestamped report into `dir`, returning its path.
///
/// # Errors
/// Returns `GlycocheckError::Io` if the directory or file cannot be written.
pub fn write_report(
    dir: &Path,
    params: &HealthParameters,
    result: &PredictionResult,
) -> Result<PathBuf> {
    let now = Utc::now();
    std::fs::create_dir_all(dir)?;

    let path = dir.join(format!(
        "diabetes-assessment-{}.txt",
        now.format("%Y%m%d-%H%M%S%3f")
    ));
    std::fs::write(&path, render_report(params, result, now))?;

    tracing::info!(path = %path.display(), "Assessment report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Confidence;
    use chrono::TimeZone;

    fn sample_result() -> PredictionResult {
        PredictionResult {
            prediction: 1,
            probability: 0.73,
            confidence: Confidence::High,
        }
    }

    #[test]
    fn test_render_report() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let text = render_report(&HealthParameters::default(), &sample_result(), at);

        assert!(text.contains("Generated: 2026-03-14 09:30:00 UTC"));
        assert!(text.contains("Prediction: Diabetic"));
        assert!(text.contains("Probability of Diabetes:     73.00%"));
        assert!(text.contains("Probability of Non-Diabetes: 27.00%"));
        assert!(text.contains("Confidence Level:            High"));
        assert!(text.contains("Diabetes Pedigree Function"));
        assert!(text.contains("0.5"));
        assert!(text.ends_with(&format!("{DISCLAIMER}\n")));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let target = dir.path().join("reports");

        let path = write_report(&target, &HealthParameters::default(), &sample_result())
            .expect("Should write report");

        assert!(path.starts_with(&target));
        let contents = std::fs::read_to_string(&path).expect("Should read report");
        assert!(contents.starts_with("Diabetes Risk Assessment Results"));
    }
}
