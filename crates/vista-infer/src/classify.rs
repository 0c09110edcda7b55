use crate::{InferError, InferResponse};
use std::fmt;

/// One entry of a server-side top-k classification.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub score: f32,
    pub index: usize,
    pub label: String,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) = {:.2}", self.label, self.index, self.score)
    }
}

/// Parse a `"score:index:label"` string. The label is optional and may
/// itself contain colons.
pub fn parse_classification(entry: &str) -> Result<Classification, InferError> {
    let mut parts = entry.splitn(3, ':');
    let bad = || InferError::Http(format!("malformed classification {entry:?}"));

    let score = parts.next().and_then(|s| s.trim().parse().ok()).ok_or_else(bad)?;
    let index = parts.next().and_then(|s| s.trim().parse().ok()).ok_or_else(bad)?;
    let label = parts.next().unwrap_or("").trim().to_string();
    Ok(Classification { score, index, label })
}

/// Classifications carried by the first output of `response`, best first as
/// the server ranked them. Empty labels are filled from `labels`.
pub fn classifications(response: &InferResponse, labels: &[String]) -> Result<Vec<Classification>, InferError> {
    let output = response
        .first()
        .ok_or_else(|| InferError::Http("response has no outputs".to_string()))?;
    output
        .strings()
        .iter()
        .map(|entry| {
            let mut class = parse_classification(entry)?;
            if class.label.is_empty() {
                if let Some(label) = labels.get(class.index) {
                    class.label = label.clone();
                }
            }
            Ok(class)
        })
        .collect()
}
