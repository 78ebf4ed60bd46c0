use std::{fs, path::PathBuf};
use tallyup_application::{LedgerSnapshot, SettlementResult, SnapshotLoadError, SnapshotReader};

enum Source {
    File(PathBuf),
    Inline(String),
}

/// Reads a [`LedgerSnapshot`] from JSON.
pub struct JsonSnapshotReader {
    source: Source,
}

impl JsonSnapshotReader {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }

    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            source: Source::Inline(content.into()),
        }
    }
}

impl SnapshotReader for JsonSnapshotReader {
    fn read(&self) -> Result<LedgerSnapshot, SnapshotLoadError> {
        match &self.source {
            Source::File(path) => {
                let content = fs::read_to_string(path).map_err(|source| SnapshotLoadError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), bytes = content.len(), "Snapshot file read");
                parse_snapshot(&content)
            }
            Source::Inline(content) => parse_snapshot(content),
        }
    }
}

pub fn parse_snapshot(content: &str) -> Result<LedgerSnapshot, SnapshotLoadError> {
    serde_json::from_str(content).map_err(|err| SnapshotLoadError::Parse {
        line: err.line(),
        column: err.column(),
        detail: err.to_string(),
    })
}

pub fn render_result(result: &SettlementResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
