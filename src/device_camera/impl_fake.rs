use crate::device_camera::interface::DeviceCamera;
use crate::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    width: u32,
    height: u32,
    start_failure: Option<String>,
    live: AtomicBool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_resolution(logger, 640, 480)
    }

    pub fn with_resolution(logger: Arc<dyn Logger + Send + Sync>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            start_failure: None,
            live: AtomicBool::new(false),
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }

    /// A camera whose access request is always denied.
    pub fn denied(logger: Arc<dyn Logger + Send + Sync>, message: &str) -> Self {
        Self {
            start_failure: Some(message.to_string()),
            ..Self::new(logger)
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        if let Some(message) = &self.start_failure {
            return Err(message.clone().into());
        }
        self.live.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if !self.is_live() {
            return Err("camera is not streaming".into());
        }

        let mut rng = rand::rng();
        let frame = RgbImage::from_fn(self.width, self.height, |_, _| {
            Rgb([rng.random(), rng.random(), rng.random()])
        });

        Ok(DynamicImage::ImageRgb8(frame))
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}
