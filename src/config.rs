use chrono::Offset;
use reqwest::Url;
use std::time::Duration;

pub const PREDICT_PATH: &str = "/predict";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKind {
    Fake,
    Gstreamer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendKind {
    Gui,
    Terminal,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub file_field_name: String,
    pub snapshot_file_name: String,
    pub jpeg_quality: u8,
    pub camera: CameraKind,
    pub camera_device: Option<String>,
    pub frame_interval: Duration,
    pub frontend: FrontendKind,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000/".to_string(),
            file_field_name: "file".to_string(),
            snapshot_file_name: "webcam.jpg".to_string(),
            // Browsers encode canvas JPEGs at 0.92 unless told otherwise.
            jpeg_quality: 92,
            camera: CameraKind::Fake,
            camera_device: None,
            frame_interval: Duration::from_millis(33),
            frontend: FrontendKind::Gui,
            logger_timezone: utc(),
        }
    }
}

impl Config {
    /// Defaults overridden by `SNAP_PREDICT_*` environment variables.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config = Self::default();

        if let Some(value) = lookup("SNAP_PREDICT_SERVER_URL") {
            Url::parse(&value)
                .map_err(|e| format!("SNAP_PREDICT_SERVER_URL {:?}: {}", value, e))?;
            config.server_url = value;
        }

        if let Some(value) = lookup("SNAP_PREDICT_JPEG_QUALITY") {
            config.jpeg_quality = match value.parse::<u8>() {
                Ok(quality) if (1..=100).contains(&quality) => quality,
                _ => {
                    return Err(format!(
                        "SNAP_PREDICT_JPEG_QUALITY must be 1..=100, got {:?}",
                        value
                    )
                    .into())
                }
            };
        }

        if let Some(value) = lookup("SNAP_PREDICT_CAMERA") {
            config.camera = match value.to_lowercase().as_str() {
                "fake" => CameraKind::Fake,
                "gstreamer" => CameraKind::Gstreamer,
                _ => return Err(format!("SNAP_PREDICT_CAMERA unknown: {:?}", value).into()),
            };
        }

        if let Some(value) = lookup("SNAP_PREDICT_CAMERA_DEVICE") {
            config.camera_device = Some(value).filter(|device| !device.is_empty());
        }

        if let Some(value) = lookup("SNAP_PREDICT_FRONTEND") {
            config.frontend = match value.to_lowercase().as_str() {
                "gui" => FrontendKind::Gui,
                "terminal" => FrontendKind::Terminal,
                _ => return Err(format!("SNAP_PREDICT_FRONTEND unknown: {:?}", value).into()),
            };
        }

        if let Some(value) = lookup("SNAP_PREDICT_TZ_OFFSET_HOURS") {
            let hours = value
                .parse::<i32>()
                .map_err(|e| format!("SNAP_PREDICT_TZ_OFFSET_HOURS {:?}: {}", value, e))?;
            config.logger_timezone = chrono::FixedOffset::east_opt(hours * 3600)
                .ok_or_else(|| format!("SNAP_PREDICT_TZ_OFFSET_HOURS out of range: {}", hours))?;
        }

        Ok(config)
    }

    pub fn predict_url(&self) -> Result<Url, Box<dyn std::error::Error + Send + Sync>> {
        self.resolve(PREDICT_PATH)
    }

    /// Resolves a server-relative reference (such as a returned `image_path`)
    /// the way a page served from `server_url` would.
    pub fn resolve(
        &self,
        reference: &str,
    ) -> Result<Url, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Url::parse(&self.server_url)?.join(reference)?)
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
