use crate::{DisplayError, ExitReason, Preview};
use minifb::{Key, Window, WindowOptions};
use vista_base::Tensor;
use vista_image::rgb_to_u32;

/// Platform capability telling whether the user closed a window.
pub trait CloseProbe {
    fn was_closed(&self, window: &Window) -> bool;
}

/// Reads the window's open state.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenStateProbe;

impl CloseProbe for OpenStateProbe {
    fn was_closed(&self, window: &Window) -> bool {
        !window.is_open()
    }
}

/// For platforms without a close notification; only the exit key stops the
/// loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverClosed;

impl CloseProbe for NeverClosed {
    fn was_closed(&self, _window: &Window) -> bool {
        false
    }
}

#[cfg(any(unix, windows))]
pub type PlatformProbe = OpenStateProbe;

#[cfg(not(any(unix, windows)))]
pub type PlatformProbe = NeverClosed;

/// minifb window sized to the frames it is given.
///
/// The window opens on the first `show` and is recreated if the frame size
/// changes. Dropping it closes the window.
pub struct PreviewWindow<P: CloseProbe = PlatformProbe> {
    title: String,
    window: Option<Window>,
    size: (usize, usize),
    buffer: Vec<u32>,
    probe: P,
}

impl PreviewWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_probe(title, PlatformProbe::default())
    }
}

impl<P: CloseProbe> PreviewWindow<P> {
    pub fn with_probe(title: impl Into<String>, probe: P) -> Self {
        Self {
            title: title.into(),
            window: None,
            size: (0, 0),
            buffer: Vec::new(),
            probe,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl<P: CloseProbe> Preview for PreviewWindow<P> {
    fn show(&mut self, frame: &Tensor<u8>) -> Result<(), DisplayError> {
        let (height, width) = match frame.hwc() {
            Some((h, w, 3)) => (h, w),
            _ => {
                return Err(DisplayError::Window(format!(
                    "expected an RGB frame, got {:?}",
                    frame.shape
                )));
            }
        };

        if self.window.is_none() || self.size != (width, height) {
            log::debug!("opening {width}x{height} window {:?}", self.title);
            self.window = Some(Window::new(&self.title, width, height, WindowOptions::default())?);
            self.size = (width, height);
        }

        self.buffer = rgb_to_u32(frame);
        if let Some(window) = self.window.as_mut() {
            window.update_with_buffer(&self.buffer, width, height)?;
        }
        Ok(())
    }

    fn poll_exit(&mut self) -> Option<ExitReason> {
        let window = self.window.as_ref()?;
        if window.is_key_down(Key::Escape) {
            Some(ExitReason::Key)
        } else if self.probe.was_closed(window) {
            Some(ExitReason::WindowClosed)
        } else {
            None
        }
    }
}
