use std::fmt;
use vista_camera::CameraError;
use vista_infer::InferError;

#[derive(Debug)]
pub enum DisplayError {
    Window(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Window(msg) => write!(f, "window error: {msg}"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<minifb::Error> for DisplayError {
    fn from(err: minifb::Error) -> Self {
        DisplayError::Window(err.to_string())
    }
}

#[derive(Debug)]
pub enum PipelineError {
    Camera(CameraError),
    Infer(InferError),
    Display(DisplayError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Camera(err) => write!(f, "camera: {err}"),
            PipelineError::Infer(err) => write!(f, "inference: {err}"),
            PipelineError::Display(err) => write!(f, "display: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Camera(err) => Some(err),
            PipelineError::Infer(err) => Some(err),
            PipelineError::Display(err) => Some(err),
        }
    }
}

impl From<CameraError> for PipelineError {
    fn from(err: CameraError) -> Self {
        PipelineError::Camera(err)
    }
}

impl From<InferError> for PipelineError {
    fn from(err: InferError) -> Self {
        PipelineError::Infer(err)
    }
}

impl From<DisplayError> for PipelineError {
    fn from(err: DisplayError) -> Self {
        PipelineError::Display(err)
    }
}
