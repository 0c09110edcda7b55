//! Frame decoding and annotation for the vista demos.
//!
//! Frames are `Tensor<u8>` in HWC layout `[height, width, 3]`, RGB order.
//! Decoding wraps the `image` crate; drawing writes straight into the frame
//! buffer and clips everything to the frame bounds.

pub mod convert;
pub mod draw;
pub mod error;
pub mod text;

pub use convert::rgb_to_u32;
pub use draw::{Rgb, draw_line, draw_rect, fill_rect, set_pixel};
pub use error::ImageError;
pub use text::{GLYPH_SIZE, draw_text, text_size};

use vista_base::Tensor;

/// Decode a compressed image (JPEG, PNG) into an RGB frame.
///
/// Grayscale, alpha and 16-bit sources are converted to 8-bit RGB so every
/// frame handed to the rest of the pipeline has three channels.
pub fn decode_rgb(data: &[u8]) -> Result<Tensor<u8>, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.into_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?)
}
