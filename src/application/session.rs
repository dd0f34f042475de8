//! Prediction session: the view-state controller.
//!
//! All state lives in an owned [`PredictionSession`] and changes only
//! through [`PredictionSession::update`], which returns the side effects
//! (network dispatch, notifications) for the caller to carry out.

use crate::domain::{
    FieldEdit, HealthParameters, Notification, ParameterField, ParameterForm, PredictionResult,
};
use crate::ports::TransportError;

/// Monotonic identifier of a dispatched request.
pub type RequestId = u64;

/// Which panel is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Submitting { request_id: RequestId },
}

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Editing, no request in flight
    Idle,
    /// A request is in flight
    Submitting,
    /// Showing a stored result
    Viewing,
}

/// Input to [`PredictionSession::update`].
#[derive(Debug)]
pub enum Event {
    Edit { field: ParameterField, edit: FieldEdit },
    ResetDefaults,
    Submit,
    Completed {
        request_id: RequestId,
        outcome: Result<PredictionResult, TransportError>,
    },
    ShowForm,
    ShowResult,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send `params` to the prediction service
    Dispatch {
        request_id: RequestId,
        params: HealthParameters,
    },
    Notify(Notification),
}

#[derive(Debug, Clone)]
pub struct PredictionSession {
    form: ParameterForm,
    status: RequestStatus,
    result: Option<PredictionResult>,
    /// Parameters of the in-flight request
    in_flight: Option<HealthParameters>,
    /// Parameters that produced `result`
    assessed: Option<HealthParameters>,
    view: View,
    next_request_id: RequestId,
    validation_message: Option<String>,
}

impl Default for PredictionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionSession {
    /// Start a session with default parameters and no result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: ParameterForm::default(),
            status: RequestStatus::Idle,
            result: None,
            in_flight: None,
            assessed: None,
            view: View::Form,
            next_request_id: 1,
            validation_message: None,
        }
    }

    #[must_use]
    pub fn form(&self) -> &ParameterForm {
        &self.form
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// Parameters the current result was computed from.
    #[must_use]
    pub fn assessed_parameters(&self) -> Option<&HealthParameters> {
        self.assessed.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.status, RequestStatus::Submitting { .. })
    }

    /// The result tab is disabled until a result exists.
    #[must_use]
    pub fn result_available(&self) -> bool {
        self.result.is_some()
    }

    /// Why the last submission was blocked, if it was.
    #[must_use]
    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_submitting() {
            Phase::Submitting
        } else if self.view == View::Result && self.result.is_some() {
            Phase::Viewing
        } else {
            Phase::Idle
        }
    }

    /// Apply one event and return the effects it produces.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Edit { field, edit } => {
                // Edits never reach an in-flight payload: it was copied at dispatch.
                if self.form.apply(field, edit) {
                    self.validation_message = None;
                }
                Vec::new()
            }
            Event::ResetDefaults => {
                self.form = ParameterForm::default();
                self.validation_message = None;
                Vec::new()
            }
            Event::Submit => self.submit(),
            Event::Completed {
                request_id,
                outcome,
            } => self.complete(request_id, outcome),
            Event::ShowForm => {
                self.view = View::Form;
                Vec::new()
            }
            Event::ShowResult => {
                if self.result.is_some() {
                    self.view = View::Result;
                }
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if let RequestStatus::Submitting { request_id } = self.status {
            tracing::debug!(request_id, "Submission ignored: request already in flight");
            return Vec::new();
        }

        let params = match self.form.to_parameters() {
            Ok(params) => params,
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                tracing::info!(invalid_fields = errors.len(), "Submission blocked by validation");
                self.validation_message = Some(message);
                return Vec::new();
            }
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.status = RequestStatus::Submitting { request_id };
        self.in_flight = Some(params);
        self.validation_message = None;

        tracing::info!(request_id, "Prediction request dispatched");
        vec![Effect::Dispatch { request_id, params }]
    }

    fn complete(
        &mut self,
        request_id: RequestId,
        outcome: Result<PredictionResult, TransportError>,
    ) -> Vec<Effect> {
        match self.status {
            RequestStatus::Submitting { request_id: current } if current == request_id => {}
            _ => {
                tracing::warn!(request_id, "Discarding completion for a request that is not in flight");
                return Vec::new();
            }
        }

        self.status = RequestStatus::Idle;
        let params = self.in_flight.take();

        match outcome {
            Ok(result) => {
                tracing::info!(
                    request_id,
                    prediction = result.prediction,
                    confidence = %result.confidence,
                    "Prediction received"
                );
                self.result = Some(result);
                self.assessed = params;
                self.view = View::Result;
                vec![Effect::Notify(Notification::prediction_complete())]
            }
            Err(e) => {
                tracing::error!(request_id, "Prediction request failed: {}", e);
                vec![Effect::Notify(Notification::prediction_failed())]
            }
        }
    }
}
