pub mod impl_fake;
#[cfg(feature = "gstreamer")]
pub mod impl_gstreamer;
pub mod interface;
