use super::main::CaptureClient;
use crate::capture_client::core::Model;
use std::sync::PoisonError;

impl CaptureClient {
    /// Writes the regions that changed between `previous` and `current`.
    pub fn render(
        &self,
        previous: &Model,
        current: &Model,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self
            .device_display
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if current.result_text != previous.result_text {
            if let Some(text) = &current.result_text {
                device_display.set_result_text(text)?;
            }
        }

        if current.confidence != previous.confidence {
            device_display.set_confidence(current.confidence)?;
        }

        if current.preview != previous.preview {
            if let Some(source) = &current.preview {
                device_display.show_preview(source)?;
            }
        }

        if current.input_image != previous.input_image {
            if let Some(image) = &current.input_image {
                device_display.show_input_image(&image.caption, &image.bytes)?;
            }
        }

        Ok(())
    }
}
