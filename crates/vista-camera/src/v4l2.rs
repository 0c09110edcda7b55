use crate::convert::yuyv_to_rgb;
use crate::{Camera, CameraConfig, CameraError};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};
use vista_base::Tensor;
use vista_image::ImageError;

type FrameResult = Result<Tensor<u8>, CameraError>;

/// Pixel encoding negotiated with the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelEncoding {
    Mjpeg,
    Yuyv,
}

impl PixelEncoding {
    fn fourcc(self) -> FourCC {
        match self {
            PixelEncoding::Mjpeg => FourCC::new(b"MJPG"),
            PixelEncoding::Yuyv => FourCC::new(b"YUYV"),
        }
    }
}

/// V4L2 camera.
///
/// Frames are captured on a background thread and handed over through a
/// bounded channel, so `recv` never blocks the async runtime.
pub struct V4l2Camera {
    config: CameraConfig,
    encoding: PixelEncoding,
    resolution: (u32, u32),
    device: Option<Device>,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("encoding", &self.encoding)
            .field("resolution", &self.resolution)
            .field("streaming", &self.receiver.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Tensor<u8>, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| CameraError::Channel("capture thread stopped".to_string()))?
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // closing the channel makes the next blocking_send fail, which ends the thread
        drop(self.receiver.take());
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl V4l2Camera {
    /// Open the device at `config.device()` and negotiate the capture format.
    ///
    /// MJPEG is preferred; devices that refuse it are driven in YUYV. The
    /// negotiated resolution may differ from the requested one, see
    /// [`V4l2Camera::resolution`].
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())
            .map_err(|e| CameraError::Device(format!("{}: {e}", config.device())))?;

        let (encoding, format) = Self::negotiate(&device, &config)?;

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        if let Err(e) = Capture::set_params(&device, &params) {
            log::warn!("{}: cannot set {} fps: {e}", config.device(), config.fps());
        }

        log::info!(
            "{}: streaming {:?} at {}x{}",
            config.device(),
            encoding,
            format.width,
            format.height
        );

        Ok(Self {
            resolution: (format.width, format.height),
            config,
            encoding,
            device: Some(device),
            receiver: None,
            thread_handle: None,
        })
    }

    fn negotiate(device: &Device, config: &CameraConfig) -> Result<(PixelEncoding, Format), CameraError> {
        for encoding in [PixelEncoding::Mjpeg, PixelEncoding::Yuyv] {
            let wanted = Format::new(config.width(), config.height(), encoding.fourcc());
            let format = Capture::set_format(device, &wanted)?;
            if format.fourcc == encoding.fourcc() {
                return Ok((encoding, format));
            }
            log::debug!("{}: {:?} refused, got {}", config.device(), encoding, format.fourcc);
        }
        Err(CameraError::Device(format!(
            "{}: neither MJPEG nor YUYV is supported",
            config.device()
        )))
    }

    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count() as usize;
        let (tx, rx) = mpsc::channel(buffer_count);
        let encoding = self.encoding;
        let (width, height) = self.resolution;

        let handle = thread::Builder::new()
            .name("v4l2-capture".to_string())
            .spawn(move || {
                if let Err(e) = Self::capture_loop(device, &tx, buffer_count, encoding, width, height) {
                    log::error!("capture thread: {e}");
                    let _ = tx.blocking_send(Err(e));
                }
            })?;

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);
        Ok(())
    }

    fn capture_loop(
        device: Device,
        tx: &mpsc::Sender<FrameResult>,
        buffer_count: usize,
        encoding: PixelEncoding,
        width: u32,
        height: u32,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count as u32)
            .map_err(|e| CameraError::Stream(e.to_string()))?;

        loop {
            let (data, _metadata) =
                CaptureStream::next(&mut stream).map_err(|e| CameraError::Stream(e.to_string()))?;

            // a single corrupt frame is reported to the consumer, the stream keeps going
            let frame = match encoding {
                PixelEncoding::Mjpeg => vista_image::decode_rgb(data).map_err(CameraError::from),
                PixelEncoding::Yuyv => yuyv_to_rgb(data, width, height).ok_or_else(|| {
                    CameraError::Decode(ImageError::Decode(format!("short YUYV frame: {} bytes", data.len())))
                }),
            };

            if tx.blocking_send(frame).is_err() {
                break;
            }
        }

        Ok(())
    }

    /// Resolution actually negotiated with the device, `(width, height)`.
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
