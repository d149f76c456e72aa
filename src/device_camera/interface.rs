use image::DynamicImage;

/// A live, video-only capture stream.
pub trait DeviceCamera: Send + Sync {
    /// Requests access to the device and starts streaming. Called once.
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// The frame on the stream right now, at the camera's native resolution.
    fn capture_frame(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>;

    fn is_live(&self) -> bool;
}
