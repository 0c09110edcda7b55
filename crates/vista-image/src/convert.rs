use vista_base::Tensor;

/// Pack an HWC RGB frame as `0x00RRGGBB` words, the layout minifb expects.
///
/// Returns an empty buffer when the frame is not a 3-channel image.
pub fn rgb_to_u32(frame: &Tensor<u8>) -> Vec<u32> {
    match frame.hwc() {
        Some((_, _, 3)) => frame
            .data
            .chunks_exact(3)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
            .collect(),
        _ => Vec::new(),
    }
}
