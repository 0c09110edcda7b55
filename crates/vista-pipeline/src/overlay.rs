//! Text placement shared by the demos.

use vista_base::Tensor;
use vista_image::{Rgb, draw_text, text_size};

pub const TEXT_COLOR: Rgb = [127, 15, 133];
pub const INFO_COLOR: Rgb = [0, 255, 0];
pub const TEXT_SCALE: i32 = 2;
pub const MARGIN: i32 = 32;
const BOTTOM_MARGIN: i32 = 16;
const ROW_STEP: i32 = 40;

pub fn format_fps(fps: f32) -> String {
    format!("FPS:{fps:.2}")
}

/// FPS readout in the bottom-left corner; nothing when `fps` is unknown.
pub fn draw_fps(frame: &mut Tensor<u8>, fps: Option<f32>, color: Rgb) {
    let (Some(fps), Some((height, _, _))) = (fps, frame.hwc()) else {
        return;
    };
    draw_text(
        frame,
        &format_fps(fps),
        MARGIN,
        height as i32 - BOTTOM_MARGIN,
        TEXT_SCALE,
        color,
    );
}

/// Right-aligned text in the bottom-right corner.
pub fn draw_footer(frame: &mut Tensor<u8>, text: &str, color: Rgb) {
    let Some((height, width, _)) = frame.hwc() else {
        return;
    };
    let (text_width, _) = text_size(text, TEXT_SCALE);
    draw_text(
        frame,
        text,
        width as i32 - text_width - BOTTOM_MARGIN,
        height as i32 - BOTTOM_MARGIN,
        TEXT_SCALE,
        color,
    );
}

/// Lines of text stacked down from the top-left corner.
pub fn draw_rows<S: AsRef<str>>(frame: &mut Tensor<u8>, rows: &[S], color: Rgb) {
    let mut baseline = MARGIN;
    for row in rows {
        draw_text(frame, row.as_ref(), MARGIN, baseline, TEXT_SCALE, color);
        baseline += ROW_STEP;
    }
}
