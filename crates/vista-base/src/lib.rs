pub mod interval;
pub mod logging;
pub mod tensor;

pub use interval::{IntervalCounter, fps_from_interval};
pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger};
pub use tensor::{Tensor, TensorError};

// Re-export log crate so downstream crates can use vista_base::log::*
pub use log;
