use crate::InferError;
use std::path::Path;

/// One label per line; line `i` names class `i`.
pub fn parse_labels(text: &str) -> Vec<String> {
    let mut labels: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
    while labels.last().is_some_and(|l| l.is_empty()) {
        labels.pop();
    }
    labels
}

pub fn load_labels(path: &Path) -> Result<Vec<String>, InferError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| InferError::Io(format!("{}: {e}", path.display())))?;
    Ok(parse_labels(&text))
}
