use vista_base::Tensor;
use vista_image::{draw_rect, draw_text};
use vista_infer::yolo::scale_to_frame;
use vista_infer::{Detection, InferError, InferResponse, TinyYoloDecoder};
use vista_pipeline::Annotator;
use vista_pipeline::overlay::{TEXT_COLOR, TEXT_SCALE, draw_fps, draw_footer};

pub const BOX_THICKNESS: i32 = 2;
pub const CAPTION: &str = "Tiny YOLOv2";

/// Boxes and class names for every detection, plus the frame rate.
#[derive(Debug)]
pub struct DetectionOverlay {
    decoder: TinyYoloDecoder,
    labels: Vec<String>,
}

impl DetectionOverlay {
    pub fn new(decoder: TinyYoloDecoder, labels: Vec<String>) -> Self {
        Self { decoder, labels }
    }

    /// Detections of `result` in the coordinates of a `width × height` frame.
    pub fn detections(&self, result: &InferResponse, width: usize, height: usize) -> Result<Vec<Detection>, InferError> {
        let output = result
            .first()
            .ok_or_else(|| InferError::Http("response has no outputs".to_string()))?;
        let grid = output.to_tensor()?;
        let mut detections = self.decoder.decode(&grid.data, &grid.shape)?;
        scale_to_frame(&mut detections, width, height);
        Ok(detections)
    }

    fn label(&self, class_id: usize) -> String {
        self.labels
            .get(class_id)
            .cloned()
            .unwrap_or_else(|| format!("class {class_id}"))
    }
}

impl Annotator for DetectionOverlay {
    fn annotate(&mut self, frame: &mut Tensor<u8>, result: &InferResponse, fps: Option<f32>) {
        let Some((height, width, _)) = frame.hwc() else {
            return;
        };
        match self.detections(result, width, height) {
            Ok(detections) => {
                // boxes from a bad grid can be arbitrarily large
                let limit_x = 4.0 * width as f32;
                let limit_y = 4.0 * height as f32;
                let to_x = |v: f32| v.round().clamp(-limit_x, limit_x) as i32;
                let to_y = |v: f32| v.round().clamp(-limit_y, limit_y) as i32;
                for det in &detections {
                    let x0 = to_x(det.bbox.x);
                    let y0 = to_y(det.bbox.y);
                    let x1 = to_x(det.bbox.x + det.bbox.width);
                    let y1 = to_y(det.bbox.y + det.bbox.height);
                    draw_rect(frame, x0, y0, x1, y1, BOX_THICKNESS, TEXT_COLOR);
                    let text = format!("{} {:.2}", self.label(det.class_id), det.score);
                    // above the box, or inside it when the box touches the top
                    let baseline = if y0 > 20 { y0 - 4 } else { y0 + 20 };
                    draw_text(frame, &text, x0 + 2, baseline, TEXT_SCALE, TEXT_COLOR);
                }
            }
            Err(e) => log::warn!("unreadable detection grid: {e}"),
        }
        draw_footer(frame, CAPTION, TEXT_COLOR);
        draw_fps(frame, fps, TEXT_COLOR);
    }
}
