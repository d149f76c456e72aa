use crate::config::Config;
use crate::prediction_client::form::FormPayload;
use crate::prediction_client::interface::SubmitError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};

/// Rasterizes `frame` at its native size and wraps it as the snapshot upload.
pub fn encode_snapshot(frame: &DynamicImage, config: &Config) -> Result<FormPayload, SubmitError> {
    let raster: RgbImage = frame.to_rgb8();

    if raster.width() == 0 || raster.height() == 0 {
        return Err(SubmitError::Capture("video frame is empty".to_string()));
    }

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, config.jpeg_quality).encode_image(&raster)?;

    Ok(FormPayload::new().file(
        &config.file_field_name,
        &config.snapshot_file_name,
        "image/jpeg",
        bytes,
    ))
}
