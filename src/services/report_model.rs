use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::{ColumnProfile, ReportDocument, ReportError};

/// A loaded report, read-only for the lifetime of the view
///
/// Loading only checks structure; the statistics are displayed as given.
#[derive(Debug, Clone)]
pub struct ReportModel {
    document: ReportDocument,
}

/// File-level metadata shown above the column table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOverview {
    pub name: String,
    pub source_file: String,
    pub generated_at: String,
    pub row_count: u64,
    pub column_count: usize,
}

impl ReportModel {
    /// Accept a parsed report document (`{"report": {...}}`)
    pub fn load(document: Value) -> Result<Self, ReportError> {
        let report = document.get("report").ok_or_else(|| {
            ReportError::MalformedDocument("missing `report` object".to_string())
        })?;
        let report = report.as_object().ok_or_else(|| {
            ReportError::MalformedDocument("`report` is not an object".to_string())
        })?;
        let columns = report
            .get("columns")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ReportError::MalformedDocument("missing `report.columns` array".to_string())
            })?;

        let mut parsed = Vec::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            let profile = ColumnProfile::deserialize(column)
                .map_err(|source| ReportError::MalformedColumn { index, source })?;
            parsed.push(profile);
        }

        // Metadata only; columns were handled above with their index attached.
        let mut meta = report.clone();
        meta.remove("columns");
        let mut document: ReportDocument = serde_json::from_value(Value::Object(meta))
            .map_err(|e| ReportError::MalformedDocument(e.to_string()))?;
        document.columns = parsed;

        Ok(Self::from_document(document))
    }

    /// Parse and load a report from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_str(json)?;
        Self::load(value)
    }

    /// Read, parse and load a report file
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            columns = model.column_count(),
            "loaded profile report"
        );
        Ok(model)
    }

    /// Wrap an already-typed document
    pub fn from_document(document: ReportDocument) -> Self {
        for (index, column) in document.columns.iter().enumerate() {
            if let Some(position) = column.position {
                if position != index {
                    warn!(
                        index,
                        position, "column position disagrees with its index; using the index"
                    );
                }
            }
            for issue in column.consistency_issues(document.row_count) {
                warn!(column = %column.name, index, "inconsistent statistics: {issue}");
            }
        }
        debug!(name = %document.name, rows = document.row_count, "report model ready");
        Self { document }
    }

    pub fn document(&self) -> &ReportDocument {
        &self.document
    }

    pub fn columns(&self) -> &[ColumnProfile] {
        &self.document.columns
    }

    pub fn column_count(&self) -> usize {
        self.document.columns.len()
    }

    /// Look a column up by position
    pub fn column(&self, position: usize) -> Result<&ColumnProfile, ReportError> {
        self.document
            .columns
            .get(position)
            .ok_or(ReportError::OutOfRange {
                position,
                column_count: self.column_count(),
            })
    }

    pub fn overview(&self) -> FileOverview {
        FileOverview {
            name: self.document.name.clone(),
            source_file: self.document.source_file.clone(),
            generated_at: self.document.generated_at_display(),
            row_count: self.document.row_count,
            column_count: self.column_count(),
        }
    }
}
