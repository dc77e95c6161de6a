use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::RowKey;

/// Failures while turning a report document into a [`ReportModel`](crate::services::ReportModel)
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed report document: {0}")]
    MalformedDocument(String),

    #[error("malformed column at index {index}: {source}")]
    MalformedColumn {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("column position {position} is out of range (report has {column_count} columns)")]
    OutOfRange { position: usize, column_count: usize },

    #[error("failed to parse report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read report {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejected column activations. None of these leave a panel half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no column at position {position} (report has {column_count} columns)")]
    OutOfRange { position: usize, column_count: usize },

    #[error("row {0} does not belong to the current column table")]
    StaleRow(RowKey),
}

impl SelectionError {
    pub fn position(&self) -> Option<usize> {
        match self {
            SelectionError::OutOfRange { position, .. } => Some(*position),
            SelectionError::StaleRow(key) => Some(key.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = ReportError::MalformedDocument("missing `report` object".to_string());
        assert_eq!(
            err.to_string(),
            "malformed report document: missing `report` object"
        );

        let err = SelectionError::OutOfRange {
            position: 7,
            column_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "no column at position 7 (report has 2 columns)"
        );
        assert_eq!(err.position(), Some(7));
    }

    #[test]
    fn test_stale_row_reports_key() {
        let err = SelectionError::StaleRow(RowKey::new(3));
        assert_eq!(err.position(), Some(3));
        assert!(err.to_string().contains("row 3"));
    }
}
