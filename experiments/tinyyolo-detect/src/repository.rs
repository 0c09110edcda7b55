//! Triton model repository for Tiny YOLOv2, fetched on first use.
//!
//! ```text
//! <dir>/config.pbtxt
//! <dir>/voc.names
//! <dir>/1/model.onnx
//! ```

use std::path::{Path, PathBuf};
use vista_infer::InferError;
use vista_infer::assets::{download_file, extract_onnx, write_config};

pub const MODEL_NAME: &str = "tinyyolov2_onnx";
pub const MODEL_URL: &str =
    "https://github.com/onnx/models/raw/master/vision/object_detection_segmentation/tiny-yolov2/model/tinyyolov2-8.tar.gz";
pub const LABEL_URL: &str = "https://raw.githubusercontent.com/pjreddie/darknet/master/data/voc.names";
pub const LABEL_FILE: &str = "voc.names";
pub const MODEL_FILE: &str = "model.onnx";
pub const CONFIG_FILE: &str = "config.pbtxt";
pub const VERSION: &str = "1";

pub const CONFIG_DATA: &str = r#"name: "tinyyolov2_onnx"
platform: "onnxruntime_onnx"
max_batch_size: 128
input [
  {
    name: "image"
    data_type: TYPE_FP32
    format: FORMAT_NCHW
    dims: [ 3, 416, 416 ]
  }
]
output [
  {
    name: "grid"
    data_type: TYPE_FP32
    dims: [ 125, 13, 13 ]
    label_filename: "voc.names"
  }
]
"#;

/// Paths of a prepared repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelRepository {
    pub model: PathBuf,
    pub labels: PathBuf,
    pub config: PathBuf,
}

/// Make `dir` a servable model directory. Files already present are kept,
/// the configuration is always rewritten.
pub async fn prepare_model_repository(dir: &Path) -> Result<ModelRepository, InferError> {
    let version_dir = dir.join(VERSION);
    let model = version_dir.join(MODEL_FILE);
    let model = if model.exists() {
        model
    } else {
        let archive = download_file(MODEL_URL, dir).await?;
        let model = extract_onnx(&archive, &version_dir, MODEL_FILE)?;
        if let Err(e) = std::fs::remove_file(&archive) {
            log::warn!("cannot remove {}: {e}", archive.display());
        }
        model
    };

    let labels = dir.join(LABEL_FILE);
    let labels = if labels.exists() {
        labels
    } else {
        download_file(LABEL_URL, dir).await?
    };

    let config = write_config(dir, CONFIG_FILE, CONFIG_DATA)?;
    log::info!("model repository ready in {}", dir.display());
    Ok(ModelRepository { model, labels, config })
}
