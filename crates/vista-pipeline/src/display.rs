use crate::DisplayError;
use vista_base::Tensor;

/// Why the preview asked the loop to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The exit key (ESC) was pressed.
    Key,
    WindowClosed,
}

/// Where annotated frames are shown.
pub trait Preview {
    fn show(&mut self, frame: &Tensor<u8>) -> Result<(), DisplayError>;

    /// Exit signal observed since the last `show`, if any.
    fn poll_exit(&mut self) -> Option<ExitReason>;
}
