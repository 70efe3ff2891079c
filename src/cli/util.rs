use std::path::{Path, PathBuf};

use super::runner::OutputMode;
use crate::errors::SignError;

pub fn parse_output_mode(s: Option<&str>) -> OutputMode {
    match s.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => OutputMode::Json,
        Some("plain") => OutputMode::Plain,
        _ => OutputMode::Human,
    }
}

/// The given path, else the configured fallback, else `MissingArgument(name)`.
pub fn require_path(given: Option<PathBuf>, fallback: Option<&Path>, name: &str) -> Result<PathBuf, SignError> {
    given
        .or_else(|| fallback.map(Path::to_path_buf))
        .ok_or_else(|| SignError::MissingArgument(name.to_string()))
}
