use crate::InferError;
use serde::Deserialize;
use std::fmt;

/// Memory layout of an image input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Nchw,
    Nhwc,
}

/// Tensor element type as named by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Fp16,
    Fp32,
    Fp64,
    Bytes,
}

impl DataType {
    /// Parse either the model-config spelling (`TYPE_FP32`) or the
    /// inference-protocol spelling (`FP32`).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.strip_prefix("TYPE_").unwrap_or(name);
        Some(match name {
            "BOOL" => DataType::Bool,
            "UINT8" => DataType::Uint8,
            "UINT16" => DataType::Uint16,
            "UINT32" => DataType::Uint32,
            "UINT64" => DataType::Uint64,
            "INT8" => DataType::Int8,
            "INT16" => DataType::Int16,
            "INT32" => DataType::Int32,
            "INT64" => DataType::Int64,
            "FP16" => DataType::Fp16,
            "FP32" => DataType::Fp32,
            "FP64" => DataType::Fp64,
            "BYTES" | "STRING" => DataType::Bytes,
            _ => return None,
        })
    }

    /// Name used on the wire in inference requests.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DataType::Bool => "BOOL",
            DataType::Uint8 => "UINT8",
            DataType::Uint16 => "UINT16",
            DataType::Uint32 => "UINT32",
            DataType::Uint64 => "UINT64",
            DataType::Int8 => "INT8",
            DataType::Int16 => "INT16",
            DataType::Int32 => "INT32",
            DataType::Int64 => "INT64",
            DataType::Fp16 => "FP16",
            DataType::Fp32 => "FP32",
            DataType::Fp64 => "FP64",
            DataType::Bytes => "BYTES",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// What a model expects as its single image input.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSpec {
    pub name: String,
    pub format: InputFormat,
    pub datatype: DataType,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
    /// 0 when the model does not batch; otherwise requests carry a leading
    /// batch dimension.
    pub max_batch_size: usize,
}

impl InputSpec {
    /// Shape of one request tensor, batch dimension included when the model
    /// batches.
    pub fn request_shape(&self) -> Vec<usize> {
        let mut shape = match self.format {
            InputFormat::Nchw => vec![self.channels, self.height, self.width],
            InputFormat::Nhwc => vec![self.height, self.width, self.channels],
        };
        if self.max_batch_size > 0 {
            shape.insert(0, 1);
        }
        shape
    }
}

/// Single-input, single-output model as reported by the server.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSpec {
    pub name: String,
    pub input: InputSpec,
    pub output: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Dim {
    Number(i64),
    Text(String),
}

impl Dim {
    fn value(&self) -> Option<i64> {
        match self {
            Dim::Number(n) => Some(*n),
            Dim::Text(s) => s.parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    name: String,
    #[serde(default)]
    max_batch_size: Option<Dim>,
    #[serde(default)]
    input: Vec<RawInput>,
    #[serde(default)]
    output: Vec<RawOutput>,
}

#[derive(Deserialize)]
struct RawInput {
    name: String,
    data_type: String,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    dims: Vec<Dim>,
}

#[derive(Deserialize)]
struct RawOutput {
    name: String,
}

fn positive(dim: &Dim, what: &str) -> Result<usize, InferError> {
    match dim.value() {
        Some(v) if v > 0 => Ok(v as usize),
        _ => Err(InferError::InvalidConfig(format!("{what} must be a positive dimension"))),
    }
}

/// Parse the JSON document returned by `GET /v2/models/{model}/config`.
///
/// The model must take exactly one image input laid out as NCHW or NHWC
/// with 1 or 3 channels, and produce exactly one output.
pub fn parse_model_config(json: &[u8]) -> Result<ModelSpec, InferError> {
    let raw: RawConfig = serde_json::from_slice(json)
        .map_err(|e| InferError::InvalidConfig(e.to_string()))?;

    if raw.input.len() != 1 {
        return Err(InferError::InvalidConfig(format!(
            "expecting 1 input, got {}",
            raw.input.len()
        )));
    }
    if raw.output.len() != 1 {
        return Err(InferError::InvalidConfig(format!(
            "expecting 1 output, got {}",
            raw.output.len()
        )));
    }

    let max_batch_size = match &raw.max_batch_size {
        Some(dim) => dim
            .value()
            .filter(|v| *v >= 0)
            .ok_or_else(|| InferError::InvalidConfig("bad max_batch_size".to_string()))?
            as usize,
        None => 0,
    };

    let input = &raw.input[0];
    let format = match input.format.as_deref() {
        Some("FORMAT_NCHW") => InputFormat::Nchw,
        Some("FORMAT_NHWC") => InputFormat::Nhwc,
        other => {
            return Err(InferError::InvalidConfig(format!(
                "input {} has unexpected format {}",
                input.name,
                other.unwrap_or("FORMAT_NONE")
            )));
        }
    };
    let datatype = DataType::parse(&input.data_type)
        .ok_or_else(|| InferError::InvalidConfig(format!("unknown datatype {}", input.data_type)))?;

    if input.dims.len() != 3 {
        return Err(InferError::InvalidConfig(format!(
            "input {} must have 3 dims, got {}",
            input.name,
            input.dims.len()
        )));
    }
    let [a, b, c] = [
        positive(&input.dims[0], "dims[0]")?,
        positive(&input.dims[1], "dims[1]")?,
        positive(&input.dims[2], "dims[2]")?,
    ];
    let (channels, height, width) = match format {
        InputFormat::Nchw => (a, b, c),
        InputFormat::Nhwc => (c, a, b),
    };
    if channels != 1 && channels != 3 {
        return Err(InferError::InvalidConfig(format!(
            "input {} must have 1 or 3 channels, got {channels}",
            input.name
        )));
    }

    Ok(ModelSpec {
        name: raw.name,
        input: InputSpec {
            name: input.name.clone(),
            format,
            datatype,
            channels,
            height,
            width,
            max_batch_size,
        },
        output: raw.output[0].name.clone(),
    })
}
