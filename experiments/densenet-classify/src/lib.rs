//! DenseNet image classification against a Triton server.

use vista_base::Tensor;
use vista_infer::{InferResponse, classifications};
use vista_pipeline::Annotator;
use vista_pipeline::overlay::{TEXT_COLOR, draw_fps, draw_footer, draw_rows};

pub const MODEL_NAME: &str = "densenet_onnx";
pub const WINDOW_TITLE: &str = "Triton Image Classification Demo";
pub const LABEL_URL: &str = "https://raw.githubusercontent.com/triton-inference-server/server/main/docs/examples/model_repository/densenet_onnx/densenet_labels.txt";
pub const CAPTION: &str = "DenseNet";

/// Writes the server's top classes, the frame rate and a caption.
#[derive(Debug, Default)]
pub struct ClassificationOverlay {
    labels: Vec<String>,
}

impl ClassificationOverlay {
    /// `labels` name classes the server returned without a label.
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl Annotator for ClassificationOverlay {
    fn annotate(&mut self, frame: &mut Tensor<u8>, result: &InferResponse, fps: Option<f32>) {
        match classifications(result, &self.labels) {
            Ok(classes) => {
                let rows: Vec<String> = classes.iter().map(ToString::to_string).collect();
                draw_rows(frame, &rows, TEXT_COLOR);
            }
            Err(e) => log::warn!("unreadable classification: {e}"),
        }
        draw_footer(frame, CAPTION, TEXT_COLOR);
        draw_fps(frame, fps, TEXT_COLOR);
    }
}
