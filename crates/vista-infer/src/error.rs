use std::fmt;
use vista_base::TensorError;

#[derive(Debug)]
pub enum InferError {
    /// Transport failure or a response that could not be understood.
    Http(String),
    /// The server answered with a non-success status.
    Server { status: u16, message: String },
    ModelLoad(String),
    InvalidConfig(String),
    UnsupportedDatatype(String),
    Shape(String),
    Io(String),
    Archive(String),
    Request(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Http(msg) => write!(f, "http error: {msg}"),
            InferError::Server { status, message } => write!(f, "server error ({status}): {message}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::InvalidConfig(msg) => write!(f, "invalid model config: {msg}"),
            InferError::UnsupportedDatatype(dt) => write!(f, "unsupported datatype: {dt}"),
            InferError::Shape(msg) => write!(f, "shape error: {msg}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::Archive(msg) => write!(f, "archive error: {msg}"),
            InferError::Request(msg) => write!(f, "request error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<reqwest::Error> for InferError {
    fn from(err: reqwest::Error) -> Self {
        InferError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::Http(format!("malformed JSON: {err}"))
    }
}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Shape(err.to_string())
    }
}

impl From<tokio::task::JoinError> for InferError {
    fn from(err: tokio::task::JoinError) -> Self {
        InferError::Request(format!("inference task failed: {err}"))
    }
}
