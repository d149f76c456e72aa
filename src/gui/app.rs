use crate::capture_client::core::Msg;
use crate::capture_client::upload_form::UploadForm;
use crate::device_camera::interface::DeviceCamera;
use crate::capture_client::core::UPLOADED_CAPTION;
use crate::device_display::impl_gui::{to_color_image, GuiRegions, ImageUpdate};
use crate::logger::interface::Logger;
use egui::load::SizedTexture;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

const SURFACE_WIDTH: f32 = 640.0;
const SURFACE_HEIGHT: f32 = 480.0;
const INPUT_WIDTH: f32 = 320.0;
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Video surface, capture button, upload form, then the input image beside
/// the result line and preview.
pub struct SnapPredictApp {
    regions: Arc<Mutex<GuiRegions>>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    msg_sender: Sender<Msg>,
    logger: Arc<dyn Logger + Send + Sync>,
    frame_interval: Duration,
    upload_form: UploadForm,
    video_texture: Option<egui::TextureHandle>,
    preview_texture: Option<egui::TextureHandle>,
    input_texture: Option<(String, egui::TextureHandle)>,
}

impl SnapPredictApp {
    pub fn new(
        regions: Arc<Mutex<GuiRegions>>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        msg_sender: Sender<Msg>,
        logger: Arc<dyn Logger + Send + Sync>,
        frame_interval: Duration,
    ) -> Self {
        Self {
            regions,
            device_camera,
            msg_sender,
            logger: logger.with_namespace("gui"),
            frame_interval,
            upload_form: UploadForm::default(),
            video_texture: None,
            preview_texture: None,
            input_texture: None,
        }
    }

    fn send(&self, msg: Msg) {
        if self.msg_sender.send(msg).is_err() {
            let _ = self.logger.error("Capture client is no longer running");
        }
    }

    fn refresh_video(&mut self, ctx: &egui::Context) {
        if !self.device_camera.is_live() {
            return;
        }

        // No frame yet is normal right after the stream opens.
        let Ok(frame) = self.device_camera.capture_frame() else {
            return;
        };

        let image = to_color_image(&frame);

        match &mut self.video_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::default()),
            None => {
                self.video_texture =
                    Some(ctx.load_texture("video", image, egui::TextureOptions::default()))
            }
        }
    }

    fn video_surface(&self, ui: &mut egui::Ui) {
        match &self.video_texture {
            Some(texture) => {
                ui.add(
                    egui::Image::new(SizedTexture::from_handle(texture))
                        .max_width(SURFACE_WIDTH)
                        .max_height(SURFACE_HEIGHT),
                );
            }
            None => {
                ui.allocate_space(egui::vec2(SURFACE_WIDTH, SURFACE_HEIGHT));
            }
        }
    }

    fn show_picked_file(&mut self, ctx: &egui::Context, path: &std::path::Path) {
        match image::open(path) {
            Ok(image) => {
                let image = to_color_image(&image);
                let texture = ctx.load_texture("input", image, egui::TextureOptions::default());
                self.input_texture = Some((UPLOADED_CAPTION.to_string(), texture));
            }
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("{} is not an image: {}", path.display(), e));
                self.input_texture = None;
            }
        }
    }

    fn input_image(&self, ui: &mut egui::Ui) {
        if let Some((caption, texture)) = &self.input_texture {
            ui.add(egui::Image::new(SizedTexture::from_handle(texture)).max_width(INPUT_WIDTH));
            ui.weak(caption);
        }
    }

    fn upload_form_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Choose image…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file()
                {
                    self.show_picked_file(ui.ctx(), &path);
                    self.upload_form.file = Some(path);
                }
            }

            match &self.upload_form.file {
                Some(path) => ui.label(path.display().to_string()),
                None => ui.weak("No file chosen"),
            };

            if ui.button("Predict").clicked() {
                self.send(Msg::UploadSubmitted(self.upload_form.clone()));
            }
        });
    }
}

impl eframe::App for SnapPredictApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_video(ctx);

        let (result_text, confidence, preview_visible, preview_update, input_update) = {
            let mut regions = self.regions.lock().unwrap_or_else(PoisonError::into_inner);
            (
                regions.result_text.clone(),
                regions.confidence,
                regions.preview_visible,
                regions.preview_update.take(),
                regions.input_update.take(),
            )
        };

        match preview_update {
            Some(ImageUpdate::Load(image)) => {
                let texture = ctx.load_texture("preview", image, egui::TextureOptions::default());
                self.preview_texture = Some(texture);
            }
            Some(ImageUpdate::Clear) => self.preview_texture = None,
            None => {}
        }

        match input_update {
            Some((caption, ImageUpdate::Load(image))) => {
                let texture = ctx.load_texture("input", image, egui::TextureOptions::default());
                self.input_texture = Some((caption, texture));
            }
            Some((_, ImageUpdate::Clear)) => self.input_texture = None,
            None => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Snap Predict");
                ui.add_space(8.0);

                self.video_surface(ui);

                if ui.button("📷 Capture").clicked() {
                    self.send(Msg::CaptureClicked);
                }

                ui.separator();
                self.upload_form_row(ui);
                ui.separator();

                ui.columns(2, |columns| {
                    self.input_image(&mut columns[0]);

                    let ui = &mut columns[1];
                    ui.label(egui::RichText::new(&result_text).size(18.0));

                    if let Some(score) = confidence.filter(|s| (0.0..=1.0).contains(s)) {
                        ui.add(
                            egui::ProgressBar::new(score as f32)
                                .text(format!("{:.2}%", score * 100.0)),
                        );
                    }

                    if preview_visible {
                        if let Some(texture) = &self.preview_texture {
                            ui.add(
                                egui::Image::new(SizedTexture::from_handle(texture))
                                    .max_width(SURFACE_WIDTH),
                            );
                        }
                    }
                });
            });
        });

        ctx.request_repaint_after(self.frame_interval);
    }
}

pub fn run(
    regions: Arc<Mutex<GuiRegions>>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    msg_sender: Sender<Msg>,
    logger: Arc<dyn Logger + Send + Sync>,
    frame_interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 960.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Snap Predict",
        options,
        Box::new(move |cc| {
            regions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .set_context(cc.egui_ctx.clone());
            Box::new(SnapPredictApp::new(
                regions,
                device_camera,
                msg_sender,
                logger,
                frame_interval,
            ))
        }),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
