use super::main::CaptureClient;
use crate::capture_client::core::{Effect, Msg};
use crate::capture_client::snapshot::encode_snapshot;
use crate::prediction_client::interface::SubmitError;
use crate::prediction_client::response::PredictionResponse;

impl CaptureClient {
    pub fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.execute_effect(effect));
        }
    }

    pub fn execute_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::StartCamera => {
                let started = self.device_camera.start();
                self.send(Msg::CameraStartDone(started));
            }
            Effect::CaptureSnapshot => {
                // Whatever frame is on the stream now; nothing is buffered.
                let payload = self
                    .device_camera
                    .capture_frame()
                    .map_err(|e| SubmitError::Capture(e.to_string()))
                    .and_then(|frame| encode_snapshot(&frame, &self.config));
                self.send(Msg::SnapshotDone(payload));
            }
            Effect::PrepareUpload { form } => {
                let payload = form.to_payload(&self.config);
                self.send(Msg::UploadPrepared(payload));
            }
            Effect::Submit { payload } => {
                let outcome = self
                    .prediction_client
                    .submit(payload)
                    .map(PredictionResponse::into_outcome);
                self.send(Msg::SubmitDone(outcome));
            }
            Effect::ReportDiagnostic { message } => {
                let _ = self.logger.error(&message);
            }
        }
    }
}
