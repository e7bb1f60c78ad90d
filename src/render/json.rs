//! JSON rendering for summary artifacts.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Artifact;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 2-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an artifact to JSON. Non-ASCII text is written as-is.
pub fn to_json(artifact: &Artifact, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(artifact),
        JsonFormat::Compact => serde_json::to_string(artifact),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Render an artifact and write it to `path`, replacing any previous file.
///
/// The JSON goes to `<path>.tmp` first and is renamed into place, so readers
/// never see a partially written artifact.
pub fn write_json(artifact: &Artifact, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(artifact, format)?;
    let tmp = tmp_path(path);

    let written = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
