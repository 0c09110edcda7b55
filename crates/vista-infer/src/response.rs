use crate::InferError;
use vista_base::Tensor;

/// Element data of one output.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputData {
    Fp32(Vec<f32>),
    Int64(Vec<i64>),
    Bytes(Vec<Vec<u8>>),
}

impl OutputData {
    pub fn len(&self) -> usize {
        match self {
            OutputData::Fp32(v) => v.len(),
            OutputData::Int64(v) => v.len(),
            OutputData::Bytes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutputTensor {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: OutputData,
}

impl OutputTensor {
    /// The output as an FP32 tensor.
    pub fn to_tensor(&self) -> Result<Tensor<f32>, InferError> {
        match &self.data {
            OutputData::Fp32(values) => Ok(Tensor::new(self.shape.clone(), values.clone())?),
            _ => Err(InferError::UnsupportedDatatype(format!(
                "output {} is not FP32",
                self.name
            ))),
        }
    }

    /// BYTES elements decoded as UTF-8, lossily.
    pub fn strings(&self) -> Vec<String> {
        match &self.data {
            OutputData::Bytes(items) => items
                .iter()
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Completed inference result.
#[derive(Clone, Debug, PartialEq)]
pub struct InferResponse {
    pub model_name: String,
    pub outputs: Vec<OutputTensor>,
}

impl InferResponse {
    pub fn output(&self, name: &str) -> Option<&OutputTensor> {
        self.outputs.iter().find(|o| o.name == name)
    }

    /// The only output of a single-output model.
    pub fn first(&self) -> Option<&OutputTensor> {
        self.outputs.first()
    }
}
