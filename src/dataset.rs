use std::path::Path;

use crate::error::{AppError, Result};
use crate::types::Record;

const BUNDLED: &str = include_str!("../data/issues.json");

/// Read an ordered list of records from a JSON array on disk.
pub fn load(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Dataset(format!("{}: {}", path.display(), e)))?;
    parse(&content).map_err(|e| match e {
        AppError::Dataset(msg) => AppError::Dataset(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Sample dataset compiled into the binary.
pub fn bundled() -> Result<Vec<Record>> {
    parse(BUNDLED)
}

fn parse(content: &str) -> Result<Vec<Record>> {
    serde_json::from_str(content).map_err(|e| AppError::Dataset(e.to_string()))
}
