use crate::draw::{Rgb, fill_rect};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use vista_base::Tensor;

/// Glyph cell edge in pixels at scale 1.
pub const GLYPH_SIZE: i32 = 8;

/// Width and height in pixels of `text` rendered at `scale`.
pub fn text_size(text: &str, scale: i32) -> (i32, i32) {
    let scale = scale.max(1);
    (
        text.chars().count() as i32 * GLYPH_SIZE * scale,
        GLYPH_SIZE * scale,
    )
}

/// Render `text` with its bottom-left corner at `(x, baseline)`.
///
/// Each glyph bit becomes a `scale × scale` block. Characters outside
/// Basic Latin are drawn as `?`.
pub fn draw_text(frame: &mut Tensor<u8>, text: &str, x: i32, baseline: i32, scale: i32, color: Rgb) {
    let scale = scale.max(1);
    let top = baseline - GLYPH_SIZE * scale;
    let mut origin_x = x;

    for ch in text.chars() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // bit 0 is the leftmost column
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + col * scale;
                let py = top + row as i32 * scale;
                fill_rect(frame, px, py, px + scale, py + scale, color);
            }
        }
        origin_x += GLYPH_SIZE * scale;
    }
}
