use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::logger::interface::Logger;
use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// A texture change the window has yet to apply.
pub enum ImageUpdate {
    Clear,
    Load(egui::ColorImage),
}

/// Region state shared between the display and the window that draws it.
#[derive(Default)]
pub struct GuiRegions {
    pub result_text: String,
    pub confidence: Option<f64>,
    pub preview_source: Option<String>,
    pub preview_visible: bool,
    pub preview_update: Option<ImageUpdate>,
    /// Caption and picture of the last submitted image.
    pub input_update: Option<(String, ImageUpdate)>,
    preview_generation: u64,
    context: Option<egui::Context>,
}

impl GuiRegions {
    pub fn set_context(&mut self, context: egui::Context) {
        self.context = Some(context);
    }

    fn request_repaint(&self) {
        if let Some(context) = &self.context {
            context.request_repaint();
        }
    }
}

pub struct DeviceDisplayGui {
    regions: Arc<Mutex<GuiRegions>>,
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceDisplayGui {
    pub fn new(config: Config, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            regions: Arc::new(Mutex::new(GuiRegions::default())),
            config,
            logger: logger.with_namespace("display").with_namespace("gui"),
        }
    }

    pub fn regions(&self) -> Arc<Mutex<GuiRegions>> {
        self.regions.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GuiRegions> {
        self.regions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn set_result_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut regions = self.lock();
        regions.result_text = text.to_string();
        regions.request_repaint();
        Ok(())
    }

    fn show_preview(&mut self, source: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        // The element takes the new source before anything is loaded, so the
        // old picture never stands in for it.
        let generation = {
            let mut regions = self.lock();
            regions.preview_source = Some(source.to_string());
            regions.preview_visible = true;
            regions.preview_generation += 1;
            regions.preview_update = Some(ImageUpdate::Clear);
            regions.request_repaint();
            regions.preview_generation
        };

        let url = self.config.resolve(source)?;
        let regions = self.regions.clone();
        let logger = self.logger.clone();

        // Loads like an <img>: in the background, and a failed load leaves
        // the element without a picture.
        thread::spawn(move || {
            let fetched = fetch_image(url.as_str());
            let mut regions = regions.lock().unwrap_or_else(PoisonError::into_inner);
            if regions.preview_generation != generation {
                return;
            }
            match fetched {
                Ok(image) => regions.preview_update = Some(ImageUpdate::Load(image)),
                Err(e) => {
                    let _ = logger.error(&format!("Preview {} failed: {}", url, e));
                    regions.preview_update = Some(ImageUpdate::Clear);
                }
            }
            regions.request_repaint();
        });

        Ok(())
    }

    fn set_confidence(&mut self, score: Option<f64>) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut regions = self.lock();
        regions.confidence = score;
        regions.request_repaint();
        Ok(())
    }

    fn show_input_image(
        &mut self,
        caption: &str,
        bytes: &[u8],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let (update, decoded) = match decode_image(bytes) {
            Ok(image) => (ImageUpdate::Load(image), Ok(())),
            Err(e) => (ImageUpdate::Clear, Err(e)),
        };

        let mut regions = self.lock();
        regions.input_update = Some((caption.to_string(), update));
        regions.request_repaint();

        decoded
    }
}

fn fetch_image(url: &str) -> Result<egui::ColorImage, Box<dyn Error + Send + Sync>> {
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    decode_image(&bytes)
}

fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, Box<dyn Error + Send + Sync>> {
    Ok(to_color_image(&image::load_from_memory(bytes)?))
}

pub fn to_color_image(image: &image::DynamicImage) -> egui::ColorImage {
    let image = image.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}
