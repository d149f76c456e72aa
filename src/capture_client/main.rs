use crate::capture_client::core::Msg;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::logger::interface::Logger;
use crate::prediction_client::interface::PredictionClient;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// The capture/upload adapter. Every collaborator is handed in here; the
/// adapter never looks anything up on its own.
#[derive(Clone)]
pub struct CaptureClient {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    pub(super) msg_sender: Sender<Msg>,
    pub(super) msg_receiver: Arc<Mutex<Receiver<Msg>>>,
}

impl CaptureClient {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("capture_client"),
            device_camera,
            device_display,
            prediction_client,
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
        }
    }

    /// Where front ends deliver user actions.
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_sender.clone()
    }

    pub fn send(&self, msg: Msg) {
        if let Err(e) = self.msg_sender.send(msg) {
            let _ = self.logger.error(&format!("Dropped message: {}", e));
        }
    }
}
