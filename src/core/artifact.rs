//! The output artifact: a TypeScript module exporting the normalized records.
//!
//! ```text
//! export const cdfData = [
//!   { ... }
//! ];
//! ```

use crate::domain::model::OutputRecord;
use crate::utils::error::{NormalizeError, Result};

pub const DEFAULT_CONST_NAME: &str = "cdfData";

fn declaration_prefix(const_name: &str) -> String {
    format!("export const {} = ", const_name)
}

pub fn render_artifact(const_name: &str, records: &[OutputRecord]) -> Result<String> {
    let body = serde_json::to_string_pretty(records)?;
    Ok(format!("{}{};\n", declaration_prefix(const_name), body))
}

/// Read back the array literal written by [`render_artifact`].
pub fn parse_artifact(const_name: &str, text: &str) -> Result<Vec<OutputRecord>> {
    let prefix = declaration_prefix(const_name);
    let body = text
        .strip_prefix(prefix.as_str())
        .ok_or_else(|| NormalizeError::ArtifactError {
            message: format!("expected the artifact to start with {:?}", prefix.trim_end()),
        })?;
    let body = body
        .trim_end()
        .strip_suffix(';')
        .ok_or_else(|| NormalizeError::ArtifactError {
            message: "missing ';' after the array literal".to_string(),
        })?;

    Ok(serde_json::from_str(body)?)
}
