//! Camera capture for the vista demos.
//!
//! `Camera` is the capture-device interface the frame loop consumes; the
//! V4L2 backend sits behind the `v4l2` feature.

pub mod config;
pub mod convert;
pub mod error;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use error::CameraError;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
