use vista_base::Tensor;
use vista_image::{draw_line, draw_rect, fill_rect, rgb_to_u32, set_pixel};

const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [255, 0, 0];

fn blank(width: usize, height: usize) -> Tensor<u8> {
    Tensor::zeros(vec![height, width, 3]).unwrap()
}

fn pixel(frame: &Tensor<u8>, x: usize, y: usize) -> [u8; 3] {
    let width = frame.shape[1];
    let idx = (y * width + x) * 3;
    [frame.data[idx], frame.data[idx + 1], frame.data[idx + 2]]
}

#[test]
fn test_set_pixel_ignores_out_of_bounds() {
    let mut frame = blank(4, 4);
    set_pixel(&mut frame, -1, 0, WHITE);
    set_pixel(&mut frame, 4, 0, WHITE);
    set_pixel(&mut frame, 0, 4, WHITE);
    assert!(frame.data.iter().all(|&v| v == 0));

    set_pixel(&mut frame, 3, 3, RED);
    assert_eq!(pixel(&frame, 3, 3), RED);
}

#[test]
fn test_draw_line_horizontal() {
    let mut frame = blank(10, 5);
    draw_line(&mut frame, 1, 2, 8, 2, WHITE);
    for x in 1..=8 {
        assert_eq!(pixel(&frame, x, 2), WHITE, "pixel ({x}, 2)");
    }
    assert_eq!(pixel(&frame, 0, 2), [0, 0, 0]);
    assert_eq!(pixel(&frame, 9, 2), [0, 0, 0]);
}

#[test]
fn test_draw_line_vertical() {
    let mut frame = blank(5, 10);
    draw_line(&mut frame, 2, 1, 2, 8, RED);
    for y in 1..=8 {
        assert_eq!(pixel(&frame, 2, y), RED, "pixel (2, {y})");
    }
}

#[test]
fn test_draw_line_clips_to_bounds() {
    let mut frame = blank(10, 10);
    draw_line(&mut frame, -5, 5, 15, 5, WHITE);
    for x in 0..10 {
        assert_eq!(pixel(&frame, x, 5), WHITE, "pixel ({x}, 5)");
    }
}

#[test]
fn test_draw_line_fully_outside_draws_nothing() {
    let mut frame = blank(10, 10);
    draw_line(&mut frame, -5, -5, -1, -20, WHITE);
    assert!(frame.data.iter().all(|&v| v == 0));
}

#[test]
fn test_draw_rect_outline() {
    let mut frame = blank(10, 10);
    draw_rect(&mut frame, 2, 2, 7, 6, 1, RED);
    assert_eq!(pixel(&frame, 2, 2), RED);
    assert_eq!(pixel(&frame, 7, 6), RED);
    assert_eq!(pixel(&frame, 4, 2), RED);
    assert_eq!(pixel(&frame, 2, 4), RED);
    // interior untouched
    assert_eq!(pixel(&frame, 4, 4), [0, 0, 0]);
}

#[test]
fn test_draw_rect_thickness_grows_inwards() {
    let mut frame = blank(10, 10);
    draw_rect(&mut frame, 0, 0, 9, 9, 2, WHITE);
    assert_eq!(pixel(&frame, 1, 5), WHITE);
    assert_eq!(pixel(&frame, 2, 5), [0, 0, 0]);
}

#[test]
fn test_draw_rect_with_extreme_coordinates() {
    let mut frame = blank(640, 480);
    draw_rect(&mut frame, i32::MIN, 200, i32::MAX, 260, 2, RED);
    // top and bottom edges span the whole width, the sides are off-frame
    assert_eq!(pixel(&frame, 0, 200), RED);
    assert_eq!(pixel(&frame, 639, 201), RED);
    assert_eq!(pixel(&frame, 320, 260), RED);
    assert_eq!(pixel(&frame, 320, 230), [0, 0, 0]);
}

#[test]
fn test_draw_line_with_extreme_diagonal() {
    let mut frame = blank(64, 48);
    draw_line(&mut frame, i32::MIN, i32::MIN, i32::MAX, i32::MAX, WHITE);
    assert_eq!(pixel(&frame, 10, 10), WHITE);
    assert_eq!(pixel(&frame, 40, 40), WHITE);
}

#[test]
fn test_fill_rect_clips() {
    let mut frame = blank(4, 4);
    fill_rect(&mut frame, -2, -2, 2, 2, WHITE);
    assert_eq!(pixel(&frame, 0, 0), WHITE);
    assert_eq!(pixel(&frame, 1, 1), WHITE);
    assert_eq!(pixel(&frame, 2, 2), [0, 0, 0]);
}

#[test]
fn test_drawing_on_non_rgb_tensor_is_noop() {
    let mut gray = Tensor::zeros(vec![4, 4, 1]).unwrap();
    draw_line(&mut gray, 0, 0, 3, 3, WHITE);
    fill_rect(&mut gray, 0, 0, 4, 4, WHITE);
    assert!(gray.data.iter().all(|&v| v == 0));
}

#[test]
fn test_rgb_to_u32_packs_pixels() {
    let frame = Tensor::new(vec![1, 2, 3], vec![255, 0, 0, 0, 0, 255]).unwrap();
    assert_eq!(rgb_to_u32(&frame), vec![0x00FF0000, 0x000000FF]);

    let gray = Tensor::new(vec![1, 1, 1], vec![7u8]).unwrap();
    assert!(rgb_to_u32(&gray).is_empty());
}
