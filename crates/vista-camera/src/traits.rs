use crate::CameraError;
use vista_base::Tensor;

/// Capture device consumed by the frame loop.
///
/// Opening happens in the implementation's constructor and the device is
/// released when the value is dropped.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame as an RGB `Tensor<u8>` shaped
    /// `[height, width, 3]`.
    async fn recv(&mut self) -> Result<Tensor<u8>, CameraError>;
}
