use crate::device_camera::interface::DeviceCamera;
use crate::logger::interface::Logger;
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use image::{DynamicImage, RgbImage};
use std::sync::{Arc, Mutex, PoisonError};

const START_TIMEOUT_SECS: u64 = 10;

struct Stream {
    pipeline: gst::Pipeline,
    appsink: gst_app::AppSink,
}

/// Webcam capture through a GStreamer pipeline ending in an appsink.
pub struct DeviceCameraGstreamer {
    device: Option<String>,
    stream: Mutex<Option<Stream>>,
    latest_frame: Mutex<Option<DynamicImage>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraGstreamer {
    /// `device` selects a V4L2 node; `None` lets GStreamer pick the default camera.
    pub fn new(device: Option<String>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            device,
            stream: Mutex::new(None),
            latest_frame: Mutex::new(None),
            logger: logger.with_namespace("camera").with_namespace("gstreamer"),
        }
    }

    fn pipeline_description(&self) -> String {
        let source = match &self.device {
            Some(device) => format!("v4l2src device={}", device),
            None => "autovideosrc".to_string(),
        };
        format!(
            "{} ! videoconvert ! video/x-raw,format=RGB ! appsink name=sink max-buffers=1 drop=true sync=false",
            source
        )
    }
}

impl DeviceCamera for DeviceCameraGstreamer {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        gst::init()?;

        let description = self.pipeline_description();
        self.logger.info(&format!("Launching pipeline: {}", description))?;

        let pipeline = gst::parse::launch(&description)?
            .downcast::<gst::Pipeline>()
            .map_err(|_| "pipeline description did not produce a pipeline")?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or("pipeline has no appsink")?
            .downcast::<gst_app::AppSink>()
            .map_err(|_| "sink element is not an appsink")?;

        pipeline.set_state(gst::State::Playing)?;

        let (result, _, _) = pipeline.state(gst::ClockTime::from_seconds(START_TIMEOUT_SECS));
        if let Err(e) = result {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(format!("camera did not start: {}", e).into());
        }

        *self.stream.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(Stream { pipeline, appsink });

        self.logger.info("Camera started")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        let sample = {
            let stream = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
            let stream = stream.as_ref().ok_or("camera is not streaming")?;
            stream
                .appsink
                .try_pull_sample(gst::ClockTime::from_mseconds(10))
        };

        let mut latest_frame = self
            .latest_frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(sample) = sample {
            *latest_frame = Some(sample_to_image(&sample)?);
        }

        latest_frame
            .clone()
            .ok_or_else(|| "no frame available yet".into())
    }

    fn is_live(&self) -> bool {
        self.stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for DeviceCameraGstreamer {
    fn drop(&mut self) {
        if let Some(stream) = self
            .stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            let _ = stream.pipeline.set_state(gst::State::Null);
        }
    }
}

fn sample_to_image(
    sample: &gst::Sample,
) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
    let caps = sample.caps().ok_or("sample has no caps")?;
    let info = gst_video::VideoInfo::from_caps(caps)?;
    let buffer = sample.buffer().ok_or("sample has no buffer")?;
    let map = buffer.map_readable()?;

    let width = info.width();
    let height = info.height();
    let stride = info.stride()[0] as usize;
    let row_len = width as usize * 3;

    // Rows may be padded past width * 3.
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in map.as_slice().chunks(stride).take(height as usize) {
        pixels.extend_from_slice(row.get(..row_len).ok_or("short video row")?);
    }

    let frame = RgbImage::from_raw(width, height, pixels).ok_or("truncated video frame")?;
    Ok(DynamicImage::ImageRgb8(frame))
}
