//! Client for Triton Inference Server over the KServe v2 HTTP/REST protocol.

pub mod protocol;

use crate::spec::{DataType, ModelSpec, parse_model_config};
use crate::{InferError, InferResponse, InferenceClient, InputSpec};
use protocol::HEADER_LENGTH;
use std::time::Duration;
use tokio::task::JoinHandle;
use vista_base::Tensor;

/// Connection settings for [`TritonClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct TritonConfig {
    url: String,
    timeout: Duration,
    classification: Option<usize>,
}

impl TritonConfig {
    /// `url` may omit the scheme (`localhost:8000`); `http://` is assumed.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else {
            format!("http://{url}")
        };
        Self {
            url: url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            classification: None,
        }
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask the server to return the top `count` classes of the output as
    /// `"score:index:label"` strings instead of raw tensor data.
    pub fn with_classification(mut self, count: usize) -> Self {
        self.classification = (count > 0).then_some(count);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn classification(&self) -> Option<usize> {
        self.classification
    }
}

/// Handle on a Triton server.
#[derive(Clone, Debug)]
pub struct TritonClient {
    config: TritonConfig,
    http: reqwest::Client,
}

impl TritonClient {
    pub fn new(config: TritonConfig) -> Result<Self, InferError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferError::Http(format!("cannot create HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &TritonConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.url)
    }

    pub async fn is_live(&self) -> Result<bool, InferError> {
        let response = self.http.get(self.endpoint("/v2/health/live")).send().await?;
        Ok(response.status().is_success())
    }

    pub async fn is_model_ready(&self, model: &str) -> Result<bool, InferError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/v2/models/{model}/ready")))
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Ask the server to load `model` from its repository. Needs the server
    /// to run with explicit model control.
    pub async fn request_load(&self, model: &str) -> Result<(), InferError> {
        let response = self
            .http
            .post(self.endpoint(&format!("/v2/repository/models/{model}/load")))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    pub async fn model_config(&self, model: &str) -> Result<ModelSpec, InferError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/v2/models/{model}/config")))
            .send()
            .await?;
        let body = check_status(response).await?.bytes().await?;
        parse_model_config(&body)
    }

    /// Make sure `model` is loaded and ready, then read its configuration.
    ///
    /// Every failure along the way is reported as `InferError::ModelLoad`.
    pub async fn load_model(&self, model: &str) -> Result<TritonModel, InferError> {
        let fail = |what: &str, err: InferError| InferError::ModelLoad(format!("{model}: {what}: {err}"));

        if !self.is_live().await.map_err(|e| fail("server unreachable", e))? {
            return Err(InferError::ModelLoad(format!("{model}: server is not live")));
        }

        if !self.is_model_ready(model).await.map_err(|e| fail("readiness check", e))? {
            log::info!("loading model {model}");
            self.request_load(model).await.map_err(|e| fail("load request", e))?;
            if !self.is_model_ready(model).await.map_err(|e| fail("readiness check", e))? {
                return Err(InferError::ModelLoad(format!("{model}: not ready after load")));
            }
        }

        let spec = self.model_config(model).await.map_err(|e| fail("model config", e))?;
        if spec.input.datatype != DataType::Fp32 {
            return Err(InferError::ModelLoad(format!(
                "{model}: {}",
                InferError::UnsupportedDatatype(spec.input.datatype.to_string())
            )));
        }
        log::info!(
            "model {model} ready: input {} {:?} {}x{}x{}, output {}",
            spec.input.name,
            spec.input.format,
            spec.input.channels,
            spec.input.height,
            spec.input.width,
            spec.output
        );

        Ok(TritonModel {
            http: self.http.clone(),
            infer_url: self.endpoint(&format!("/v2/models/{model}/infer")),
            model: model.to_string(),
            spec,
            classification: self.config.classification,
            pending: None,
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, InferError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    Err(InferError::Server {
        status: status.as_u16(),
        message: protocol::decode_error(&body),
    })
}

async fn send_infer(
    http: reqwest::Client,
    url: String,
    body: Vec<u8>,
    header_len: usize,
) -> Result<InferResponse, InferError> {
    let response = http
        .post(url)
        .header(HEADER_LENGTH, header_len)
        .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
        .body(body)
        .send()
        .await?;
    let response = check_status(response).await?;

    let header_len = response
        .headers()
        .get(HEADER_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    let body = response.bytes().await?;
    protocol::decode_response(&body, header_len)
}

/// A model loaded on a Triton server with at most one request in flight.
pub struct TritonModel {
    http: reqwest::Client,
    infer_url: String,
    model: String,
    spec: ModelSpec,
    classification: Option<usize>,
    pending: Option<JoinHandle<Result<InferResponse, InferError>>>,
}

impl std::fmt::Debug for TritonModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TritonModel")
            .field("model", &self.model)
            .field("spec", &self.spec)
            .field("classification", &self.classification)
            .field("in_flight", &self.pending.is_some())
            .finish()
    }
}

impl TritonModel {
    pub fn name(&self) -> &str {
        &self.model
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Run one request to completion, bypassing the in-flight slot.
    pub async fn infer(&self, input: Tensor<f32>) -> Result<InferResponse, InferError> {
        let (body, header_len) = self.encode(&input)?;
        send_infer(self.http.clone(), self.infer_url.clone(), body, header_len).await
    }

    fn encode(&self, input: &Tensor<f32>) -> Result<(Vec<u8>, usize), InferError> {
        let expected = self.spec.input.request_shape();
        if input.shape != expected {
            return Err(InferError::Shape(format!(
                "{} expects {:?}, got {:?}",
                self.spec.input.name, expected, input.shape
            )));
        }
        protocol::encode_request(
            &self.spec.input.name,
            &input.shape,
            &input.data,
            &self.spec.output,
            self.classification,
        )
    }
}

impl InferenceClient for TritonModel {
    fn input_spec(&self) -> &InputSpec {
        &self.spec.input
    }

    fn submit(&mut self, input: Tensor<f32>) -> Result<(), InferError> {
        let (body, header_len) = self.encode(&input)?;
        if let Some(stale) = self.pending.take() {
            stale.abort();
        }
        self.pending = Some(tokio::spawn(send_infer(
            self.http.clone(),
            self.infer_url.clone(),
            body,
            header_len,
        )));
        Ok(())
    }

    async fn poll(&mut self, wait: Duration) -> Option<Result<InferResponse, InferError>> {
        let handle = self.pending.as_mut()?;
        if !handle.is_finished() {
            if wait.is_zero() {
                return None;
            }
            let joined = tokio::time::timeout(wait, handle).await.ok()?;
            self.pending = None;
            return Some(joined.unwrap_or_else(|e| Err(e.into())));
        }
        let handle = self.pending.take()?;
        Some(handle.await.unwrap_or_else(|e| Err(e.into())))
    }
}

impl Drop for TritonModel {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

