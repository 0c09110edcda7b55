//! Tiny YOLOv2 object detection against a Triton server.

pub mod overlay;
pub mod repository;

pub use overlay::DetectionOverlay;
pub use repository::prepare_model_repository;

pub const WINDOW_TITLE: &str = "Triton Object Detection Demo";
