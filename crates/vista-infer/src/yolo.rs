//! Tiny YOLOv2 (VOC) output decoding.
//!
//! The network sees a 416×416 image and emits a 13×13 grid. Every cell holds
//! 5 anchor boxes of 25 channels each: `tx, ty, tw, th, tc` followed by 20
//! class logits, laid out channel-major as `[125, 13, 13]`.

use crate::InferError;
use std::cmp::Ordering;

pub const INPUT_SIZE: usize = 416;
pub const GRID_SIZE: usize = 13;
pub const CELL_SIZE: f32 = 32.0;
pub const NUM_ANCHORS: usize = 5;
pub const NUM_CLASSES: usize = 20;
const CHANNELS_PER_ANCHOR: usize = 5 + NUM_CLASSES;

/// Anchor `(width, height)` pairs in grid cells.
pub const ANCHORS: [(f32, f32); NUM_ANCHORS] = [
    (1.08, 1.19),
    (3.42, 4.41),
    (6.63, 11.38),
    (9.42, 5.11),
    (16.62, 10.52),
];

/// Axis-aligned box, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }
}

/// Intersection over union. Zero for disjoint or degenerate boxes.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    if a.area() <= 0.0 || b.area() <= 0.0 {
        return 0.0;
    }
    let ix = (a.x + a.width).min(b.x + b.width) - a.x.max(b.x);
    let iy = (a.y + a.height).min(b.y + b.height) - a.y.max(b.y);
    if ix <= 0.0 || iy <= 0.0 {
        return 0.0;
    }
    let intersection = ix * iy;
    let union = a.area() + b.area() - intersection;
    if union <= 0.0 { 0.0 } else { intersection / union }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub class_id: usize,
    pub score: f32,
}

/// Greedy non-maximum suppression across classes.
///
/// Returns the kept detections sorted by score, highest first.
pub fn nms(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut keep: Vec<Detection> = Vec::with_capacity(detections.len());
    for candidate in detections {
        if keep.iter().all(|kept| iou(&kept.bbox, &candidate.bbox) <= iou_threshold) {
            keep.push(candidate);
        }
    }
    keep
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax_max(logits: &[f32]) -> (usize, f32) {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    let mut best = (0, f32::NEG_INFINITY);
    for (i, &l) in logits.iter().enumerate() {
        let e = (l - max).exp();
        sum += e;
        if e > best.1 {
            best = (i, e);
        }
    }
    (best.0, best.1 / sum)
}

#[derive(Clone, Debug)]
pub struct TinyYoloDecoder {
    conf_threshold: f32,
    iou_threshold: f32,
}

impl Default for TinyYoloDecoder {
    fn default() -> Self {
        Self {
            conf_threshold: 0.3,
            iou_threshold: 0.4,
        }
    }
}

impl TinyYoloDecoder {
    pub fn with_thresholds(mut self, conf: f32, iou: f32) -> Self {
        self.conf_threshold = conf;
        self.iou_threshold = iou;
        self
    }

    /// Decode a `[125, 13, 13]` grid (optionally with a leading batch of 1)
    /// into detections in 416×416 input coordinates, after NMS.
    pub fn decode(&self, grid: &[f32], shape: &[usize]) -> Result<Vec<Detection>, InferError> {
        let expected = [NUM_ANCHORS * CHANNELS_PER_ANCHOR, GRID_SIZE, GRID_SIZE];
        let dims = match shape {
            [1, rest @ ..] if rest.len() == 3 => rest,
            other => other,
        };
        if dims != expected || grid.len() != expected.iter().product::<usize>() {
            return Err(InferError::Shape(format!(
                "expected grid {expected:?}, got {shape:?} with {} values",
                grid.len()
            )));
        }

        let plane = GRID_SIZE * GRID_SIZE;
        let at = |channel: usize, cy: usize, cx: usize| grid[channel * plane + cy * GRID_SIZE + cx];

        let mut candidates = Vec::new();
        let mut logits = [0.0f32; NUM_CLASSES];
        for cy in 0..GRID_SIZE {
            for cx in 0..GRID_SIZE {
                for (anchor, &(aw, ah)) in ANCHORS.iter().enumerate() {
                    let base = anchor * CHANNELS_PER_ANCHOR;
                    let confidence = sigmoid(at(base + 4, cy, cx));
                    for (k, logit) in logits.iter_mut().enumerate() {
                        *logit = at(base + 5 + k, cy, cx);
                    }
                    let (class_id, class_prob) = softmax_max(&logits);
                    let score = confidence * class_prob;
                    if !(score > self.conf_threshold) {
                        continue;
                    }

                    let center_x = (cx as f32 + sigmoid(at(base, cy, cx))) * CELL_SIZE;
                    let center_y = (cy as f32 + sigmoid(at(base + 1, cy, cx))) * CELL_SIZE;
                    let width = at(base + 2, cy, cx).exp() * aw * CELL_SIZE;
                    let height = at(base + 3, cy, cx).exp() * ah * CELL_SIZE;

                    candidates.push(Detection {
                        bbox: BoundingBox {
                            x: center_x - width / 2.0,
                            y: center_y - height / 2.0,
                            width,
                            height,
                        },
                        class_id,
                        score,
                    });
                }
            }
        }

        Ok(nms(candidates, self.iou_threshold))
    }
}

/// Map detections from input coordinates onto a `frame_width × frame_height`
/// frame.
pub fn scale_to_frame(detections: &mut [Detection], frame_width: usize, frame_height: usize) {
    let sx = frame_width as f32 / INPUT_SIZE as f32;
    let sy = frame_height as f32 / INPUT_SIZE as f32;
    for det in detections {
        det.bbox = det.bbox.scaled(sx, sy);
    }
}
