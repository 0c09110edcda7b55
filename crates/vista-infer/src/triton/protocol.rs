//! KServe v2 inference request/response bodies with Triton's binary tensor
//! extension.
//!
//! A binary request body is a JSON header immediately followed by raw tensor
//! bytes; the JSON length travels in the `Inference-Header-Content-Length`
//! HTTP header. Responses use the same framing when any output was returned
//! in binary form.

use crate::response::{InferResponse, OutputData, OutputTensor};
use crate::spec::DataType;
use crate::InferError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HEADER_LENGTH: &str = "Inference-Header-Content-Length";

#[derive(Serialize)]
struct InferRequest<'a> {
    inputs: [RequestInput<'a>; 1],
    outputs: [RequestOutput<'a>; 1],
}

#[derive(Serialize)]
struct RequestInput<'a> {
    name: &'a str,
    shape: &'a [usize],
    datatype: &'static str,
    parameters: InputParameters,
}

#[derive(Serialize)]
struct InputParameters {
    binary_data_size: usize,
}

#[derive(Serialize)]
struct RequestOutput<'a> {
    name: &'a str,
    parameters: OutputParameters,
}

#[derive(Serialize)]
struct OutputParameters {
    binary_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<usize>,
}

/// Build the body of `POST /v2/models/{model}/infer` for one FP32 input.
///
/// Returns the body and the length of its JSON header.
pub fn encode_request(
    input: &str,
    shape: &[usize],
    data: &[f32],
    output: &str,
    classification: Option<usize>,
) -> Result<(Vec<u8>, usize), InferError> {
    let binary_len = data.len() * std::mem::size_of::<f32>();
    let request = InferRequest {
        inputs: [RequestInput {
            name: input,
            shape,
            datatype: DataType::Fp32.wire_name(),
            parameters: InputParameters {
                binary_data_size: binary_len,
            },
        }],
        outputs: [RequestOutput {
            name: output,
            parameters: OutputParameters {
                binary_data: false,
                classification,
            },
        }],
    };

    let mut body = serde_json::to_vec(&request).map_err(|e| InferError::Request(e.to_string()))?;
    let header_len = body.len();
    body.reserve(binary_len);
    for value in data {
        body.extend_from_slice(&value.to_le_bytes());
    }
    Ok((body, header_len))
}

#[derive(Deserialize)]
struct InferReply {
    #[serde(default)]
    model_name: String,
    #[serde(default)]
    outputs: Vec<ReplyOutput>,
}

#[derive(Deserialize)]
struct ReplyOutput {
    name: String,
    datatype: String,
    #[serde(default)]
    shape: Vec<usize>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    parameters: Option<ReplyParameters>,
}

#[derive(Deserialize)]
struct ReplyParameters {
    binary_data_size: Option<usize>,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: String,
}

/// Extract the `{"error": ...}` message of a failed request, falling back to
/// the raw body.
pub fn decode_error(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorReply>(body) {
        Ok(reply) => reply.error,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

/// Parse an inference response body. `header_len` is the value of the
/// `Inference-Header-Content-Length` header, absent for pure JSON replies.
pub fn decode_response(body: &[u8], header_len: Option<usize>) -> Result<InferResponse, InferError> {
    let header_len = header_len.unwrap_or(body.len());
    if header_len > body.len() {
        return Err(InferError::Http(format!(
            "header length {header_len} exceeds body length {}",
            body.len()
        )));
    }
    let (header, mut binary) = body.split_at(header_len);
    let reply: InferReply = serde_json::from_slice(header)?;

    let mut outputs = Vec::with_capacity(reply.outputs.len());
    for out in reply.outputs {
        let datatype = DataType::parse(&out.datatype)
            .ok_or_else(|| InferError::UnsupportedDatatype(out.datatype.clone()))?;
        let binary_size = out.parameters.as_ref().and_then(|p| p.binary_data_size);

        let data = match (binary_size, &out.data) {
            (Some(size), _) => {
                if size > binary.len() {
                    return Err(InferError::Http(format!(
                        "output {} claims {size} bytes, {} left",
                        out.name,
                        binary.len()
                    )));
                }
                let (chunk, rest) = binary.split_at(size);
                binary = rest;
                decode_binary(&out.name, datatype, chunk)?
            }
            (None, Some(values)) => decode_json(&out.name, datatype, values)?,
            (None, None) => {
                return Err(InferError::Http(format!("output {} carries no data", out.name)));
            }
        };

        outputs.push(OutputTensor {
            name: out.name,
            shape: out.shape,
            data,
        });
    }

    Ok(InferResponse {
        model_name: reply.model_name,
        outputs,
    })
}

fn decode_binary(name: &str, datatype: DataType, bytes: &[u8]) -> Result<OutputData, InferError> {
    let misaligned = |width: usize| {
        InferError::Http(format!("output {name}: {} bytes is not a multiple of {width}", bytes.len()))
    };
    match datatype {
        DataType::Fp32 => {
            if bytes.len() % 4 != 0 {
                return Err(misaligned(4));
            }
            Ok(OutputData::Fp32(
                bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ))
        }
        DataType::Int64 => {
            if bytes.len() % 8 != 0 {
                return Err(misaligned(8));
            }
            Ok(OutputData::Int64(
                bytes
                    .chunks_exact(8)
                    .map(|c| i64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                    .collect(),
            ))
        }
        DataType::Bytes => {
            // each element is a 4-byte little-endian length followed by its bytes
            let mut items = Vec::new();
            let mut rest = bytes;
            while !rest.is_empty() {
                if rest.len() < 4 {
                    return Err(InferError::Http(format!("output {name}: truncated element length")));
                }
                let len = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
                rest = &rest[4..];
                if rest.len() < len {
                    return Err(InferError::Http(format!("output {name}: truncated element")));
                }
                items.push(rest[..len].to_vec());
                rest = &rest[len..];
            }
            Ok(OutputData::Bytes(items))
        }
        other => Err(InferError::UnsupportedDatatype(other.to_string())),
    }
}

fn flatten<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| flatten(v, out)),
        other => out.push(other),
    }
}

fn decode_json(name: &str, datatype: DataType, values: &Value) -> Result<OutputData, InferError> {
    let mut flat = Vec::new();
    flatten(values, &mut flat);
    let bad = |v: &Value| InferError::Http(format!("output {name}: unexpected element {v}"));

    match datatype {
        DataType::Fp32 => flat
            .into_iter()
            .map(|v| v.as_f64().map(|f| f as f32).ok_or_else(|| bad(v)))
            .collect::<Result<Vec<f32>, _>>()
            .map(OutputData::Fp32),
        DataType::Int64 => flat
            .into_iter()
            .map(|v| v.as_i64().ok_or_else(|| bad(v)))
            .collect::<Result<Vec<i64>, _>>()
            .map(OutputData::Int64),
        DataType::Bytes => flat
            .into_iter()
            .map(|v| v.as_str().map(|s| s.as_bytes().to_vec()).ok_or_else(|| bad(v)))
            .collect::<Result<Vec<Vec<u8>>, _>>()
            .map(OutputData::Bytes),
        other => Err(InferError::UnsupportedDatatype(other.to_string())),
    }
}
