//! Board export: the node list as a timestamped JSON download.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::consts::EXPORT_FILE_PREFIX;
use crate::node::Node;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export timestamp format failed: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("export write failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A ready-to-save export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    /// JSON array of every node, selection state included.
    pub contents: String,
}

/// A node as it appears in an export. Unlike the stored snapshot, the
/// export carries the transient `selected` flag.
#[derive(Serialize)]
struct ExportedNode<'a> {
    #[serde(flatten)]
    node: &'a Node,
    selected: bool,
}

impl ExportArtifact {
    /// Build the artifact for `nodes` as of `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the nodes cannot be encoded or the timestamp
    /// cannot be formatted.
    pub fn build(nodes: &[Arc<Node>], at: OffsetDateTime) -> Result<Self, ExportError> {
        let exported: Vec<ExportedNode<'_>> =
            nodes.iter().map(|node| ExportedNode { node, selected: node.selected }).collect();
        Ok(Self { filename: export_filename(at)?, contents: serde_json::to_string(&exported)? })
    }

    /// Write the artifact into `dir`, returning the full path.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io { path: dir.to_path_buf(), source })?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.contents).map_err(|source| ExportError::Io { path: path.clone(), source })?;
        Ok(path)
    }
}

/// `InchDesk-export-2024-05-01T09:30:00.000Z.json` style name, in UTC.
///
/// # Errors
///
/// Returns [`ExportError::Timestamp`] if formatting fails.
pub fn export_filename(at: OffsetDateTime) -> Result<String, ExportError> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    let stamp = at.to_offset(time::UtcOffset::UTC).format(format)?;
    Ok(format!("{EXPORT_FILE_PREFIX}{stamp}.json"))
}
