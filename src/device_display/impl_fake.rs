use crate::device_display::interface::DeviceDisplay;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayWrite {
    ResultText(String),
    Preview(String),
    Confidence(Option<f64>),
    InputImage { caption: String, len: usize },
}

/// Keeps the regions in memory and the order they were written in.
#[derive(Debug, Default)]
pub struct DeviceDisplayFake {
    pub result_text: Option<String>,
    pub preview_source: Option<String>,
    pub preview_visible: bool,
    pub confidence: Option<f64>,
    pub input_image: Option<(String, Vec<u8>)>,
    pub writes: Vec<DisplayWrite>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn set_result_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.result_text = Some(text.to_string());
        self.writes.push(DisplayWrite::ResultText(text.to_string()));
        Ok(())
    }

    fn show_preview(&mut self, source: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.preview_source = Some(source.to_string());
        self.preview_visible = true;
        self.writes.push(DisplayWrite::Preview(source.to_string()));
        Ok(())
    }

    fn set_confidence(&mut self, score: Option<f64>) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.confidence = score;
        self.writes.push(DisplayWrite::Confidence(score));
        Ok(())
    }

    fn show_input_image(
        &mut self,
        caption: &str,
        bytes: &[u8],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.input_image = Some((caption.to_string(), bytes.to_vec()));
        self.writes.push(DisplayWrite::InputImage {
            caption: caption.to_string(),
            len: bytes.len(),
        });
        Ok(())
    }
}
