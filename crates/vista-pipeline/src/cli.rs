use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vista_camera::CameraConfig;
use vista_infer::TritonConfig;

/// Camera and logging flags shared by every demo.
#[derive(Args, Clone, Debug)]
pub struct CaptureArgs {
    /// Camera ID, opened as /dev/video<ID>
    #[arg(long, value_name = "CAMERA_ID", default_value_t = 0)]
    pub camera: u32,

    /// Capture width
    #[arg(long, value_name = "CAPTURE_WIDTH", default_value_t = 640)]
    pub width: u32,

    /// Capture height
    #[arg(long, value_name = "CAPTURE_HEIGHT", default_value_t = 480)]
    pub height: u32,

    /// Write daily log files here instead of logging to stdout
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl CaptureArgs {
    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig::default()
            .with_index(self.camera)
            .with_width(self.width)
            .with_height(self.height)
    }
}

/// Inference server flags.
#[derive(Args, Clone, Debug)]
pub struct ServerArgs {
    /// Triton Inference Server URL
    #[arg(long, value_name = "SERVER_URL", env = "VISTA_SERVER_URL", default_value = "localhost:8000")]
    pub url: String,

    /// Milliseconds each frame may wait for the previous frame's result
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub result_wait_ms: u64,
}

impl ServerArgs {
    pub fn triton_config(&self) -> TritonConfig {
        TritonConfig::new(self.url.clone())
    }

    pub fn result_wait(&self) -> Duration {
        Duration::from_millis(self.result_wait_ms)
    }
}

/// Install the stdout logger, or the file logger when `log_dir` is given.
/// Falls back to stdout if the log directory cannot be used.
pub fn init_logging(log_dir: Option<&Path>) {
    match log_dir {
        Some(dir) => {
            if let Err(e) = vista_base::init_file_logger(dir) {
                vista_base::init_stdout_logger();
                log::warn!("cannot log to {}: {e}", dir.display());
            }
        }
        None => vista_base::init_stdout_logger(),
    }
}
