use vista_base::Tensor;

fn bt601(y: f32, u: f32, v: f32) -> [u8; 3] {
    let (u, v) = (u - 128.0, v - 128.0);
    [
        (y + 1.402 * v).clamp(0.0, 255.0) as u8,
        (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8,
        (y + 1.772 * u).clamp(0.0, 255.0) as u8,
    ]
}

/// Convert packed YUYV 4:2:2 (`Y0 U Y1 V`, two pixels per four bytes) into
/// an HWC RGB frame using BT.601 coefficients.
///
/// Returns `None` if `data` is shorter than `width * height * 2` bytes or
/// `width` is odd.
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Option<Tensor<u8>> {
    let (width, height) = (width as usize, height as usize);
    let expected = width * height * 2;
    if width % 2 != 0 || data.len() < expected {
        return None;
    }

    let mut rgb = Vec::with_capacity(width * height * 3);
    for chunk in data[..expected].chunks_exact(4) {
        let (y0, u, y1, v) = (chunk[0] as f32, chunk[1] as f32, chunk[2] as f32, chunk[3] as f32);
        rgb.extend_from_slice(&bt601(y0, u, v));
        rgb.extend_from_slice(&bt601(y1, u, v));
    }

    Tensor::new(vec![height, width, 3], rgb).ok()
}
