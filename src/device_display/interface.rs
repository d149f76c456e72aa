use std::error::Error;

/// The two regions a prediction is shown in: a line of result text and a
/// preview image that stays hidden until a source is given.
pub trait DeviceDisplay: Send + Sync {
    /// Replace the text of the result region
    fn set_result_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Point the preview image at `source` (a server-relative or absolute URI)
    /// and make it visible
    fn show_preview(&mut self, source: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Score for the bar under the result, `None` hides it
    fn set_confidence(&mut self, _score: Option<f64>) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    /// The encoded image that was just submitted, shown beside the result
    fn show_input_image(
        &mut self,
        _caption: &str,
        _bytes: &[u8],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
