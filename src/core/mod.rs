pub mod error;
pub mod formatter;
pub mod report;
pub mod types;

pub use error::{ReportError, SelectionError};
pub use formatter::{Formatter, PLACEHOLDER, Percent};
pub use report::{ColumnProfile, ConsistencyIssue, DisplayValue, ReportDocument, ValueCounts};
pub use types::*;
