use crate::{InferError, InferResponse, InputSpec};
use std::time::Duration;
use vista_base::Tensor;

/// A loaded model on an inference server, driven one request at a time.
///
/// `submit` starts a request in the background and returns immediately.
/// `poll` hands back the outcome of the most recent submission once it has
/// completed; a request that was superseded by a newer `submit` never
/// surfaces.
#[allow(async_fn_in_trait)]
pub trait InferenceClient {
    /// Input the model expects: layout, element type, size and batching.
    fn input_spec(&self) -> &InputSpec;

    /// Start inference on `input`, dropping any request still in flight.
    fn submit(&mut self, input: Tensor<f32>) -> Result<(), InferError>;

    /// Take the completed result, waiting at most `wait` for it.
    ///
    /// `None` means nothing is ready: no request in flight, or it has not
    /// finished within `wait`. A zero `wait` never suspends.
    async fn poll(&mut self, wait: Duration) -> Option<Result<InferResponse, InferError>>;
}
