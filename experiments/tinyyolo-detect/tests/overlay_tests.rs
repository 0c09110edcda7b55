use tinyyolo_detect::DetectionOverlay;
use vista_base::Tensor;
use vista_infer::{InferResponse, OutputData, OutputTensor, TinyYoloDecoder};
use vista_pipeline::Annotator;
use vista_pipeline::overlay::TEXT_COLOR;

const PLANE: usize = 13 * 13;

/// One confident "person" (class 14) from anchor 0 in the center cell.
fn grid_response(batched: bool) -> InferResponse {
    let mut grid = vec![0.0f32; 125 * PLANE];
    let cell = 6 * 13 + 6;
    grid[4 * PLANE + cell] = 10.0;
    grid[(5 + 14) * PLANE + cell] = 10.0;
    let shape = if batched { vec![1, 125, 13, 13] } else { vec![125, 13, 13] };
    InferResponse {
        model_name: "tinyyolov2_onnx".to_string(),
        outputs: vec![OutputTensor {
            name: "grid".to_string(),
            shape,
            data: OutputData::Fp32(grid),
        }],
    }
}

fn voc_labels() -> Vec<String> {
    (0..20).map(|i| if i == 14 { "person".to_string() } else { format!("c{i}") }).collect()
}

fn pixel(frame: &Tensor<u8>, x: usize, y: usize) -> [u8; 3] {
    let width = frame.shape[1];
    let i = (y * width + x) * 3;
    [frame.data[i], frame.data[i + 1], frame.data[i + 2]]
}

#[test]
fn test_detections_scaled_to_frame() {
    let overlay = DetectionOverlay::new(TinyYoloDecoder::default(), voc_labels());
    let detections = overlay.detections(&grid_response(true), 832, 416).unwrap();

    assert_eq!(detections.len(), 1);
    let det = &detections[0];
    assert_eq!(det.class_id, 14);
    assert!(det.score > 0.9);
    // center of cell (6, 6) is 208 in input space, doubled horizontally
    let center_x = det.bbox.x + det.bbox.width / 2.0;
    let center_y = det.bbox.y + det.bbox.height / 2.0;
    assert!((center_x - 416.0).abs() < 1e-3);
    assert!((center_y - 208.0).abs() < 1e-3);
}

#[test]
fn test_box_drawn_around_detection() {
    let mut frame = Tensor::zeros(vec![416, 416, 3]).unwrap();
    let mut overlay = DetectionOverlay::new(TinyYoloDecoder::default(), voc_labels());
    overlay.annotate(&mut frame, &grid_response(false), Some(12.5));

    // left edge of the 34.56 x 38.08 anchor box centered on (208, 208)
    assert_eq!(pixel(&frame, 191, 208), TEXT_COLOR);
    assert_eq!(pixel(&frame, 225, 208), TEXT_COLOR);
    // inside stays untouched
    assert_eq!(pixel(&frame, 208, 208), [0, 0, 0]);
}

#[test]
fn test_oversized_box_is_drawn_clipped() {
    let mut frame = Tensor::zeros(vec![480, 640, 3]).unwrap();
    let mut overlay = DetectionOverlay::new(TinyYoloDecoder::default(), voc_labels());
    let mut response = grid_response(false);
    if let OutputData::Fp32(grid) = &mut response.outputs[0].data {
        // exp(20) anchor widths: far wider than i32 in frame pixels
        grid[2 * PLANE + 6 * 13 + 6] = 20.0;
    }
    overlay.annotate(&mut frame, &response, None);

    // box is 38.08 * 480/416 tall around y = 240; its top edge crosses the frame
    assert_eq!(pixel(&frame, 0, 218), TEXT_COLOR);
    assert_eq!(pixel(&frame, 639, 218), TEXT_COLOR);
}

#[test]
fn test_empty_grid_draws_no_boxes() {
    let mut frame = Tensor::zeros(vec![416, 416, 3]).unwrap();
    let mut overlay = DetectionOverlay::new(TinyYoloDecoder::default(), Vec::new());
    let mut response = grid_response(false);
    response.outputs[0].data = OutputData::Fp32(vec![0.0; 125 * PLANE]);
    overlay.annotate(&mut frame, &response, None);

    // only the caption on the bottom line is painted
    let painted = (0..416)
        .flat_map(|y| (0..416).map(move |x| (x, y)))
        .filter(|&(x, y)| pixel(&frame, x, y) == TEXT_COLOR)
        .all(|(_, y)| y >= 416 - 32);
    assert!(painted);
}

#[test]
fn test_wrong_grid_shape_is_skipped() {
    let overlay = DetectionOverlay::new(TinyYoloDecoder::default(), Vec::new());
    let mut response = grid_response(false);
    response.outputs[0].shape = vec![125, 26, 26];
    assert!(overlay.detections(&response, 416, 416).is_err());

    let mut frame = Tensor::zeros(vec![416, 416, 3]).unwrap();
    let mut overlay = overlay;
    overlay.annotate(&mut frame, &response, None);
}
