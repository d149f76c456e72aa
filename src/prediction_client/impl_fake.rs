use crate::logger::interface::Logger;
use crate::prediction_client::form::FormPayload;
use crate::prediction_client::interface::{PredictionClient, SubmitError};
use crate::prediction_client::response::PredictionResponse;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

struct Scripted {
    delay: Duration,
    result: Result<PredictionResponse, SubmitError>,
}

/// Answers submissions from a script, in call order, and keeps every
/// payload it was sent.
pub struct PredictionClientFake {
    script: Mutex<VecDeque<Scripted>>,
    received: Mutex<Vec<FormPayload>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            received: Mutex::new(Vec::new()),
            logger: logger.with_namespace("prediction_client").with_namespace("fake"),
        }
    }

    pub fn respond_json(&self, body: &str) {
        self.respond_json_after(body, Duration::ZERO);
    }

    pub fn respond_json_after(&self, body: &str, delay: Duration) {
        let result = PredictionResponse::decode(body.as_bytes()).map_err(SubmitError::from);
        self.push(delay, result);
    }

    pub fn fail(&self, error: SubmitError) {
        self.push(Duration::ZERO, Err(error));
    }

    pub fn received(&self) -> Vec<FormPayload> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, delay: Duration, result: Result<PredictionResponse, SubmitError>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted { delay, result });
    }
}

impl PredictionClient for PredictionClientFake {
    fn submit(&self, payload: FormPayload) -> Result<PredictionResponse, SubmitError> {
        let _ = self
            .logger
            .info(&format!("submit ({} fields)", payload.fields.len()));

        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload);

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match scripted {
            Some(Scripted { delay, result }) => {
                std::thread::sleep(delay);
                result
            }
            None => Err(SubmitError::Transport("Failed to fetch".to_string())),
        }
    }
}
