//! The frame loop behind the vista demos and the pieces it drives: the
//! preview window, text overlays and the shared command-line flags.

pub mod cli;
pub mod display;
pub mod error;
pub mod overlay;
pub mod pipeliner;
pub mod window;

pub use cli::{CaptureArgs, ServerArgs, init_logging};
pub use display::{ExitReason, Preview};
pub use error::{DisplayError, PipelineError};
pub use pipeliner::{Annotator, PipelineConfig, PipelineSummary, Pipeliner, SLOW_SERVER_FRAMES};
pub use window::{CloseProbe, NeverClosed, OpenStateProbe, PlatformProbe, PreviewWindow};
