//! Remote inference for the vista demos.
//!
//! A model is loaded on a Triton server through [`TritonClient`] and then
//! driven through the [`InferenceClient`] trait. Helpers turn frames into
//! model inputs and model outputs into classifications or detections.

pub mod assets;
pub mod classify;
pub mod client;
pub mod error;
pub mod labels;
pub mod preprocess;
pub mod response;
pub mod spec;
pub mod triton;
pub mod yolo;

pub use classify::{Classification, classifications, parse_classification};
pub use client::InferenceClient;
pub use error::InferError;
pub use labels::{load_labels, parse_labels};
pub use preprocess::{Scaling, preprocess, resize_nearest};
pub use response::{InferResponse, OutputData, OutputTensor};
pub use spec::{DataType, InputFormat, InputSpec, ModelSpec, parse_model_config};
pub use triton::{TritonClient, TritonConfig, TritonModel};
pub use yolo::{BoundingBox, Detection, TinyYoloDecoder};
