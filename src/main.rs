use capture_client::main::CaptureClient;
use config::{CameraKind, Config, FrontendKind};
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::interface::DeviceCamera;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use logger::impl_console::LoggerConsole;
use logger::interface::Logger;
use prediction_client::impl_http::PredictionClientHttp;
use std::sync::{Arc, Mutex};

mod capture_client;
mod config;
mod device_camera;
mod device_display;
mod gui;
mod logger;
mod prediction_client;
mod terminal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env().map_err(|e| e.to_string())?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = new_device_camera(&config, logger.clone())?;

    let prediction_client = Arc::new(
        PredictionClientHttp::new(config.predict_url().map_err(|e| e.to_string())?, logger.clone())
            .map_err(|e| e.to_string())?,
    );

    match config.frontend {
        FrontendKind::Gui => {
            let device_display = DeviceDisplayGui::new(config.clone(), logger.clone());
            let regions = device_display.regions();

            let capture_client = CaptureClient::new(
                config.clone(),
                logger.clone(),
                device_camera.clone(),
                Arc::new(Mutex::new(device_display)),
                prediction_client,
            );
            let msg_sender = capture_client.sender();

            let run_logger = logger.clone();
            std::thread::spawn(move || {
                if let Err(e) = capture_client.run() {
                    let _ = run_logger.error(&format!("Capture client stopped: {}", e));
                }
            });

            gui::app::run(
                regions,
                device_camera,
                msg_sender,
                logger,
                config.frame_interval,
            )
        }
        FrontendKind::Terminal => {
            let capture_client = CaptureClient::new(
                config.clone(),
                logger.clone(),
                device_camera,
                Arc::new(Mutex::new(DeviceDisplayConsole::new())),
                prediction_client,
            );
            let msg_sender = capture_client.sender();

            let runner = std::thread::spawn(move || capture_client.run());

            terminal::run(std::io::stdin().lock(), msg_sender, logger).map_err(|e| e.to_string())?;

            match runner.join() {
                Ok(result) => result.map_err(|e| e.to_string().into()),
                Err(_) => Err("capture client thread panicked".into()),
            }
        }
    }
}

fn new_device_camera(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn DeviceCamera + Send + Sync>, Box<dyn std::error::Error>> {
    match config.camera {
        CameraKind::Fake => Ok(Arc::new(DeviceCameraFake::new(logger))),
        #[cfg(feature = "gstreamer")]
        CameraKind::Gstreamer => Ok(Arc::new(
            device_camera::impl_gstreamer::DeviceCameraGstreamer::new(
                config.camera_device.clone(),
                logger,
            ),
        )),
        #[cfg(not(feature = "gstreamer"))]
        CameraKind::Gstreamer => {
            Err("SNAP_PREDICT_CAMERA=gstreamer needs the `gstreamer` feature".into())
        }
    }
}
