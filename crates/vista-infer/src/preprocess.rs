use crate::spec::{DataType, InputFormat, InputSpec};
use crate::InferError;
use std::str::FromStr;
use vista_base::Tensor;

/// Pixel value normalization applied before a frame is sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scaling {
    /// Raw 0-255 values.
    #[default]
    None,
    /// `x / 127.5 - 1`, mapping pixels to [-1, 1].
    Inception,
    /// Subtract the ImageNet channel mean.
    Vgg,
}

impl FromStr for Scaling {
    type Err = InferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Scaling::None),
            "INCEPTION" => Ok(Scaling::Inception),
            "VGG" => Ok(Scaling::Vgg),
            other => Err(InferError::Request(format!("unknown scaling {other}"))),
        }
    }
}

const VGG_MEAN_RGB: [f32; 3] = [123.0, 117.0, 104.0];
const VGG_MEAN_GRAY: f32 = 128.0;

/// Nearest-neighbour resize of an HWC frame.
pub fn resize_nearest(frame: &Tensor<u8>, width: usize, height: usize) -> Result<Tensor<u8>, InferError> {
    let (h, w, c) = frame
        .hwc()
        .ok_or_else(|| InferError::Shape(format!("expected HWC frame, got {:?}", frame.shape)))?;
    if h == 0 || w == 0 || width == 0 || height == 0 {
        return Err(InferError::Shape(format!(
            "cannot resize {w}x{h} to {width}x{height}"
        )));
    }
    if (w, h) == (width, height) {
        return Ok(frame.clone());
    }

    let mut data = Vec::with_capacity(width * height * c);
    for y in 0..height {
        let src_y = (y * h / height).min(h - 1);
        for x in 0..width {
            let src_x = (x * w / width).min(w - 1);
            let idx = (src_y * w + src_x) * c;
            data.extend_from_slice(&frame.data[idx..idx + c]);
        }
    }
    Ok(Tensor::new(vec![height, width, c], data)?)
}

/// Convert an RGB frame into the tensor `spec` describes.
///
/// Resizes to the model's size, collapses to luma for single-channel
/// models, applies `scaling`, transposes to NCHW when the model declares it
/// and prepends a batch of one when the model batches.
pub fn preprocess(frame: &Tensor<u8>, spec: &InputSpec, scaling: Scaling) -> Result<Tensor<f32>, InferError> {
    if spec.datatype != DataType::Fp32 {
        return Err(InferError::UnsupportedDatatype(spec.datatype.to_string()));
    }
    match frame.hwc() {
        Some((_, _, 3)) => {}
        _ => {
            return Err(InferError::Shape(format!(
                "expected RGB frame, got {:?}",
                frame.shape
            )));
        }
    }

    let resized = resize_nearest(frame, spec.width, spec.height)?;
    let pixels = spec.width * spec.height;
    let c = spec.channels;

    // HWC with the model's channel count
    let mut hwc: Vec<f32> = Vec::with_capacity(pixels * c);
    for px in resized.data.chunks_exact(3) {
        let rgb = [px[0] as f32, px[1] as f32, px[2] as f32];
        if c == 1 {
            let luma = 0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2];
            hwc.push(match scaling {
                Scaling::None => luma,
                Scaling::Inception => luma / 127.5 - 1.0,
                Scaling::Vgg => luma - VGG_MEAN_GRAY,
            });
        } else {
            for (ch, value) in rgb.into_iter().enumerate() {
                hwc.push(match scaling {
                    Scaling::None => value,
                    Scaling::Inception => value / 127.5 - 1.0,
                    Scaling::Vgg => value - VGG_MEAN_RGB[ch],
                });
            }
        }
    }

    let data = match spec.format {
        InputFormat::Nhwc => hwc,
        InputFormat::Nchw => {
            let mut chw = vec![0.0; hwc.len()];
            for p in 0..pixels {
                for ch in 0..c {
                    chw[ch * pixels + p] = hwc[p * c + ch];
                }
            }
            chw
        }
    };

    Ok(Tensor::new(spec.request_shape(), data)?)
}
