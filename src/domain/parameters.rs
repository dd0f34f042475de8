//! Health parameter types for diabetes risk prediction.
//!
//! Based on the Pima Indians Diabetes dataset features consumed by the
//! prediction service.

/// One of the eight health parameters collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    Dpf,
    Age,
}

/// Static description of a parameter: label, domain, and input precision.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Number of decimals shown and kept when stepping
    pub decimals: usize,
    /// Whole numbers only
    pub integer: bool,
    pub default: f64,
}

impl FieldSpec {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Human-readable range, e.g. `0-17` or `0.078-2.42`.
    #[must_use]
    pub fn range_hint(&self) -> String {
        format!("{}-{}", format_value(self.min, 3), format_value(self.max, 3))
    }
}

const PREGNANCIES: FieldSpec = FieldSpec {
    label: "Pregnancies",
    unit: "",
    description: "Number of times pregnant",
    min: 0.0,
    max: 17.0,
    step: 1.0,
    decimals: 0,
    integer: true,
    default: 0.0,
};

const GLUCOSE: FieldSpec = FieldSpec {
    label: "Glucose",
    unit: "mg/dL",
    description: "Plasma glucose concentration at 2 hours in oral glucose tolerance test",
    min: 0.0,
    max: 199.0,
    step: 1.0,
    decimals: 0,
    integer: false,
    default: 100.0,
};

const BLOOD_PRESSURE: FieldSpec = FieldSpec {
    label: "Blood Pressure",
    unit: "mm Hg",
    description: "Diastolic blood pressure (mm Hg)",
    min: 0.0,
    max: 122.0,
    step: 1.0,
    decimals: 0,
    integer: false,
    default: 70.0,
};

const SKIN_THICKNESS: FieldSpec = FieldSpec {
    label: "Skin Thickness",
    unit: "mm",
    description: "Triceps skin fold thickness (mm)",
    min: 0.0,
    max: 99.0,
    step: 1.0,
    decimals: 0,
    integer: false,
    default: 20.0,
};

const INSULIN: FieldSpec = FieldSpec {
    label: "Insulin",
    unit: "μU/ml",
    description: "2-Hour serum insulin (μU/ml)",
    min: 0.0,
    max: 846.0,
    step: 1.0,
    decimals: 0,
    integer: false,
    default: 100.0,
};

const BMI: FieldSpec = FieldSpec {
    label: "BMI",
    unit: "kg/m²",
    description: "Body mass index (weight in kg/(height in m)²)",
    min: 0.0,
    max: 67.1,
    step: 0.1,
    decimals: 1,
    integer: false,
    default: 25.0,
};

const DPF: FieldSpec = FieldSpec {
    label: "Diabetes Pedigree Function",
    unit: "",
    description: "Diabetes pedigree function (genetic score)",
    min: 0.078,
    max: 2.42,
    step: 0.001,
    decimals: 3,
    integer: false,
    default: 0.5,
};

const AGE: FieldSpec = FieldSpec {
    label: "Age",
    unit: "years",
    description: "Age in years",
    min: 21.0,
    max: 81.0,
    step: 1.0,
    decimals: 0,
    integer: true,
    default: 30.0,
};

impl ParameterField {
    /// Form order, which is also the wire order.
    pub const ALL: [Self; 8] = [
        Self::Pregnancies,
        Self::Glucose,
        Self::BloodPressure,
        Self::SkinThickness,
        Self::Insulin,
        Self::Bmi,
        Self::Dpf,
        Self::Age,
    ];

    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        match self {
            Self::Pregnancies => &PREGNANCIES,
            Self::Glucose => &GLUCOSE,
            Self::BloodPressure => &BLOOD_PRESSURE,
            Self::SkinThickness => &SKIN_THICKNESS,
            Self::Insulin => &INSULIN,
            Self::Bmi => &BMI,
            Self::Dpf => &DPF,
            Self::Age => &AGE,
        }
    }

    /// Name of the field in the JSON request body.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Pregnancies => "pregnancies",
            Self::Glucose => "glucose",
            Self::BloodPressure => "blood_pressure",
            Self::SkinThickness => "skin_thickness",
            Self::Insulin => "insulin",
            Self::Bmi => "bmi",
            Self::Dpf => "dpf",
            Self::Age => "age",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Pregnancies => 0,
            Self::Glucose => 1,
            Self::BloodPressure => 2,
            Self::SkinThickness => 3,
            Self::Insulin => 4,
            Self::Bmi => 5,
            Self::Dpf => 6,
            Self::Age => 7,
        }
    }
}

impl std::fmt::Display for ParameterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spec().label)
    }
}

/// A complete, validated set of health parameters.
///
/// Only constructed from defaults or from a fully valid form, so every
/// field is always within its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthParameters {
    pub pregnancies: u32,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub dpf: f64,
    pub age: u32,
}

impl Default for HealthParameters {
    fn default() -> Self {
        Self {
            pregnancies: 0,
            glucose: 100.0,
            blood_pressure: 70.0,
            skin_thickness: 20.0,
            insulin: 100.0,
            bmi: 25.0,
            dpf: 0.5,
            age: 30,
        }
    }
}

impl HealthParameters {
    #[must_use]
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::Pregnancies => f64::from(self.pregnancies),
            ParameterField::Glucose => self.glucose,
            ParameterField::BloodPressure => self.blood_pressure,
            ParameterField::SkinThickness => self.skin_thickness,
            ParameterField::Insulin => self.insulin,
            ParameterField::Bmi => self.bmi,
            ParameterField::Dpf => self.dpf,
            ParameterField::Age => f64::from(self.age),
        }
    }

    /// Build parameters from values in [`ParameterField::ALL`] order.
    ///
    /// # Errors
    /// Returns the first field whose value is outside its domain.
    pub fn from_values(values: [f64; 8]) -> Result<Self, FieldError> {
        for field in ParameterField::ALL {
            validate_value(field, values[field.index()])
                .map_err(|error| FieldError { field, error })?;
        }

        Ok(Self {
            pregnancies: values[0] as u32,
            glucose: values[1],
            blood_pressure: values[2],
            skin_thickness: values[3],
            insulin: values[4],
            bmi: values[5],
            dpf: values[6],
            age: values[7] as u32,
        })
    }
}

/// Why a field cannot be submitted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("value is required")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("must be a whole number")]
    NotAnInteger,

    #[error("must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// A validation error attached to the field it came from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {error}")]
pub struct FieldError {
    pub field: ParameterField,
    pub error: ValidationError,
}

fn validate_value(field: ParameterField, value: f64) -> Result<f64, ValidationError> {
    let spec = field.spec();
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(value.to_string()));
    }
    if spec.integer && value.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger);
    }
    if !spec.contains(value) {
        return Err(ValidationError::OutOfRange {
            min: spec.min,
            max: spec.max,
        });
    }
    Ok(value)
}

/// Parse the text of a form field into a submittable value.
///
/// # Errors
/// Returns a [`ValidationError`] for empty, unparseable, fractional
/// (integer fields) or out-of-range input.
pub fn parse_field(field: ParameterField, text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    validate_value(field, value)
}

/// Render a value with at most `decimals` decimals, dropping trailing zeros.
#[must_use]
pub fn format_value(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// State of a single form input.
///
/// Typing may leave a field temporarily unparseable; such a field is
/// `Pending` and blocks submission instead of being coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Valid { value: f64, text: String },
    Pending { text: String, error: ValidationError },
}

impl FieldInput {
    fn from_text(field: ParameterField, text: String) -> Self {
        match parse_field(field, &text) {
            Ok(value) => Self::Valid { value, text },
            Err(error) => Self::Pending { text, error },
        }
    }

    fn from_value(field: ParameterField, value: f64) -> Self {
        Self::from_text(field, format_value(value, field.spec().decimals))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Valid { text, .. } | Self::Pending { text, .. } => text,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Valid { value, .. } => Some(*value),
            Self::Pending { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid { .. } => None,
            Self::Pending { error, .. } => Some(error),
        }
    }
}

/// An edit applied to one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Append a typed character (digits, '.' and '-' only)
    Insert(char),
    Backspace,
    Clear,
    /// Replace the whole text
    Set(String),
    /// Nudge up by one step, clamped to the domain
    Increment,
    /// Nudge down by one step, clamped to the domain
    Decrement,
}

/// Editable inputs for all eight parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterForm {
    inputs: [FieldInput; 8],
}

impl Default for ParameterForm {
    fn default() -> Self {
        Self::from_parameters(&HealthParameters::default())
    }
}

impl ParameterForm {
    #[must_use]
    pub fn from_parameters(params: &HealthParameters) -> Self {
        Self {
            inputs: ParameterField::ALL.map(|field| FieldInput::from_value(field, params.get(field))),
        }
    }

    #[must_use]
    pub fn input(&self, field: ParameterField) -> &FieldInput {
        &self.inputs[field.index()]
    }

    /// Apply an edit. Returns `true` if the field changed.
    pub fn apply(&mut self, field: ParameterField, edit: FieldEdit) -> bool {
        let current = self.input(field).clone();
        let next = match edit {
            FieldEdit::Insert(c) => {
                if !(c.is_ascii_digit() || c == '.' || c == '-') {
                    return false;
                }
                let mut text = current.text().to_string();
                text.push(c);
                FieldInput::from_text(field, text)
            }
            FieldEdit::Backspace => {
                let mut text = current.text().to_string();
                if text.pop().is_none() {
                    return false;
                }
                FieldInput::from_text(field, text)
            }
            FieldEdit::Clear => FieldInput::from_text(field, String::new()),
            FieldEdit::Set(text) => FieldInput::from_text(field, text),
            FieldEdit::Increment => Self::stepped(field, &current, 1.0),
            FieldEdit::Decrement => Self::stepped(field, &current, -1.0),
        };

        let changed = next != current;
        self.inputs[field.index()] = next;
        changed
    }

    fn stepped(field: ParameterField, current: &FieldInput, direction: f64) -> FieldInput {
        let spec = field.spec();
        // A pending field steps from the bottom of the range.
        let base = match current {
            FieldInput::Valid { value, .. } => *value,
            FieldInput::Pending { text, .. } => match text.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v.clamp(spec.min, spec.max),
                _ => spec.min,
            },
        };
        // Off-grid values move to the adjacent multiple of the step.
        let steps = base / spec.step;
        let nearest = steps.round();
        let target = if (steps - nearest).abs() < 1e-6 {
            nearest + direction
        } else if direction > 0.0 {
            steps.ceil()
        } else {
            steps.floor()
        };
        let value = round_to(target * spec.step, spec.decimals).clamp(spec.min, spec.max);
        FieldInput::from_value(field, value)
    }

    /// Every field that currently blocks submission.
    #[must_use]
    pub fn errors(&self) -> Vec<FieldError> {
        ParameterField::ALL
            .iter()
            .filter_map(|&field| {
                self.input(field).error().map(|error| FieldError {
                    field,
                    error: error.clone(),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.inputs.iter().all(|i| i.value().is_some())
    }

    /// Snapshot the form as submittable parameters.
    ///
    /// # Errors
    /// Returns every invalid field if any input is pending.
    pub fn to_parameters(&self) -> Result<HealthParameters, Vec<FieldError>> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut values = [0.0; 8];
        for field in ParameterField::ALL {
            if let Some(v) = self.input(field).value() {
                values[field.index()] = v;
            }
        }
        HealthParameters::from_values(values).map_err(|e| vec![e])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let form = ParameterForm::default();
        assert!(form.is_valid());
        assert_eq!(form.to_parameters().expect("Defaults valid"), HealthParameters::default());
        assert_eq!(form.input(ParameterField::Dpf).text(), "0.5");
        assert_eq!(form.input(ParameterField::Bmi).text(), "25");
    }

    #[test]
    fn test_defaults_within_domain() {
        let params = HealthParameters::default();
        for field in ParameterField::ALL {
            assert!(field.spec().contains(params.get(field)), "{field} out of domain");
            assert!((field.spec().default - params.get(field)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_empty_field_blocks_submission() {
        let mut form = ParameterForm::default();
        form.apply(ParameterField::Glucose, FieldEdit::Clear);

        let errors = form.to_parameters().expect_err("Empty field must block");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, ParameterField::Glucose);
        assert_eq!(errors[0].error, ValidationError::Empty);
    }

    #[test]
    fn test_typing_through_pending_state() {
        let mut form = ParameterForm::default();
        form.apply(ParameterField::Bmi, FieldEdit::Clear);
        form.apply(ParameterField::Bmi, FieldEdit::Insert('.'));
        assert!(matches!(
            form.input(ParameterField::Bmi).error(),
            Some(ValidationError::NotANumber(_))
        ));

        form.apply(ParameterField::Bmi, FieldEdit::Backspace);
        for c in "31.6".chars() {
            form.apply(ParameterField::Bmi, FieldEdit::Insert(c));
        }
        assert_eq!(form.input(ParameterField::Bmi).value(), Some(31.6));
    }

    #[test]
    fn test_rejects_letters() {
        let mut form = ParameterForm::default();
        assert!(!form.apply(ParameterField::Age, FieldEdit::Insert('x')));
        assert_eq!(form.input(ParameterField::Age).text(), "30");
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        assert_eq!(
            parse_field(ParameterField::Pregnancies, "2.5"),
            Err(ValidationError::NotAnInteger)
        );
        assert_eq!(parse_field(ParameterField::Pregnancies, "2"), Ok(2.0));
        assert_eq!(parse_field(ParameterField::Glucose, "120.5"), Ok(120.5));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            parse_field(ParameterField::Age, "18"),
            Err(ValidationError::OutOfRange { min: 21.0, max: 81.0 })
        );
        assert!(parse_field(ParameterField::Dpf, "0.077").is_err());
        assert_eq!(parse_field(ParameterField::Dpf, "0.078"), Ok(0.078));
        assert_eq!(parse_field(ParameterField::Bmi, "67.1"), Ok(67.1));
        assert!(parse_field(ParameterField::Bmi, "67.2").is_err());
    }

    #[test]
    fn test_stepping_clamps_and_rounds() {
        let mut form = ParameterForm::default();
        form.apply(ParameterField::Dpf, FieldEdit::Increment);
        assert_eq!(form.input(ParameterField::Dpf).text(), "0.501");

        form.apply(ParameterField::Bmi, FieldEdit::Set("67.1".into()));
        form.apply(ParameterField::Bmi, FieldEdit::Increment);
        assert_eq!(form.input(ParameterField::Bmi).value(), Some(67.1));

        form.apply(ParameterField::Pregnancies, FieldEdit::Decrement);
        assert_eq!(form.input(ParameterField::Pregnancies).value(), Some(0.0));
    }

    #[test]
    fn test_stepping_off_grid_value_moves_to_neighbour() {
        let mut form = ParameterForm::default();
        form.apply(ParameterField::Glucose, FieldEdit::Set("120.5".into()));
        form.apply(ParameterField::Glucose, FieldEdit::Increment);
        assert_eq!(form.input(ParameterField::Glucose).value(), Some(121.0));

        form.apply(ParameterField::Glucose, FieldEdit::Set("120.5".into()));
        form.apply(ParameterField::Glucose, FieldEdit::Decrement);
        assert_eq!(form.input(ParameterField::Glucose).value(), Some(120.0));

        form.apply(ParameterField::Bmi, FieldEdit::Set("31.65".into()));
        form.apply(ParameterField::Bmi, FieldEdit::Increment);
        assert_eq!(form.input(ParameterField::Bmi).value(), Some(31.7));
    }

    #[test]
    fn test_stepping_pending_field_starts_at_minimum() {
        let mut form = ParameterForm::default();
        form.apply(ParameterField::Age, FieldEdit::Clear);
        form.apply(ParameterField::Age, FieldEdit::Increment);
        assert_eq!(form.input(ParameterField::Age).value(), Some(22.0));
    }

    #[test]
    fn test_from_values_rejects_out_of_domain() {
        let mut values = ParameterField::ALL.map(|f| f.spec().default);
        values[ParameterField::Insulin.index()] = 900.0;
        let err = HealthParameters::from_values(values).expect_err("Should reject");
        assert_eq!(err.field, ParameterField::Insulin);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(25.0, 1), "25");
        assert_eq!(format_value(0.5, 3), "0.5");
        assert_eq!(format_value(0.078, 3), "0.078");
        assert_eq!(format_value(70.0, 0), "70");
    }
}
