//! Background worker for non-blocking prediction requests.
//!
//! The HTTP call blocks, so it runs on its own thread and reports back
//! over a channel that the TUI main loop polls.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::RequestId;
use crate::domain::{HealthParameters, PredictionResult};
use crate::ports::{PredictionService, TransportError};

/// Completion report from the worker.
#[derive(Debug)]
pub struct PredictionCompleted {
    pub request_id: RequestId,
    pub outcome: Result<PredictionResult, TransportError>,
}

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    request_id: RequestId,
    rx: Receiver<PredictionCompleted>,
    handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Try to receive the completion (non-blocking).
    ///
    /// A worker that exited without reporting yields a network failure
    /// so the session never stays stuck in the submitting state.
    #[must_use]
    pub fn try_recv(&self) -> Option<PredictionCompleted> {
        match self.rx.try_recv() {
            Ok(done) => Some(done),
            Err(TryRecvError::Empty) if !self.handle.is_finished() => None,
            Err(TryRecvError::Empty) => self.rx.try_recv().ok().or_else(|| Some(self.lost())),
            Err(TryRecvError::Disconnected) => Some(self.lost()),
        }
    }

    fn lost(&self) -> PredictionCompleted {
        tracing::error!(request_id = self.request_id, "Prediction worker exited without a result");
        PredictionCompleted {
            request_id: self.request_id,
            outcome: Err(TransportError::Network(
                "prediction worker exited unexpectedly".to_string(),
            )),
        }
    }
}

/// Worker that runs one prediction request in the background.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a background request. The payload is owned by the worker,
    /// so later form edits cannot change it.
    pub fn spawn(
        service: Arc<dyn PredictionService>,
        request_id: RequestId,
        params: HealthParameters,
    ) -> PredictionWorkerHandle {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let outcome = service.predict(&params);
            // The receiver is gone only if the app has quit.
            let _ = tx.send(PredictionCompleted {
                request_id,
                outcome,
            });
        });

        PredictionWorkerHandle {
            request_id,
            rx,
            handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Confidence;
    use std::time::{Duration, Instant};

    struct EchoService;

    impl PredictionService for EchoService {
        fn predict(&self, params: &HealthParameters) -> Result<PredictionResult, TransportError> {
            Ok(PredictionResult {
                prediction: u8::from(params.glucose > 140.0),
                probability: params.glucose / 200.0,
                confidence: Confidence::Low,
            })
        }

        fn endpoint(&self) -> &str {
            "echo"
        }
    }

    struct PanickingService;

    impl PredictionService for PanickingService {
        fn predict(&self, _: &HealthParameters) -> Result<PredictionResult, TransportError> {
            panic!("backend exploded");
        }

        fn endpoint(&self) -> &str {
            "panic"
        }
    }

    fn wait_for(handle: &PredictionWorkerHandle) -> PredictionCompleted {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(done) = handle.try_recv() {
                return done;
            }
            assert!(Instant::now() < deadline, "worker did not complete");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_worker_reports_completion() {
        let handle = PredictionWorker::spawn(Arc::new(EchoService), 9, HealthParameters::default());
        assert_eq!(handle.request_id(), 9);

        let done = wait_for(&handle);
        assert_eq!(done.request_id, 9);
        let result = done.outcome.expect("Should succeed");
        assert!((result.probability - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_worker_panic_reports_failure() {
        let handle = PredictionWorker::spawn(Arc::new(PanickingService), 3, HealthParameters::default());

        let done = wait_for(&handle);
        assert_eq!(done.request_id, 3);
        assert!(matches!(done.outcome, Err(TransportError::Network(_))));
    }
}
