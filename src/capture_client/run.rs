use super::main::CaptureClient;
use crate::capture_client::core::{init, transition, Msg};
use std::sync::PoisonError;

impl CaptureClient {
    /// Processes messages until `Msg::Shutdown`. Effects run on their own
    /// threads, so completions arrive in whatever order they finish.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut current_model, effects) = init();

        self.execute_effects(effects);

        let receiver = self
            .msg_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        loop {
            let msg = receiver.recv()?;

            if let Msg::Shutdown = msg {
                let _ = self.logger.info("Shutting down");
                return Ok(());
            }

            let _ = self
                .logger
                .info(&format!("msg: {}", msg.to_display_string()));

            let (new_model, effects) = transition(current_model.clone(), msg);

            if new_model.camera != current_model.camera {
                let _ = self
                    .logger
                    .info(&format!("camera: {:?}", new_model.camera));
            }

            if let Err(e) = self.render(&current_model, &new_model) {
                let _ = self.logger.error(&format!("Render failed: {}", e));
            }

            current_model = new_model;

            self.execute_effects(effects);
        }
    }
}
