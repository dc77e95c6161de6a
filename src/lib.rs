#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod core;
pub mod logging;
pub mod render;
pub mod services;
pub mod tui;

// Re-export commonly used types
pub use core::{ColumnProfile, Formatter, ReportDocument, ReportError, SelectionError};
pub use render::MemoryView;
pub use services::{ReportController, ReportModel, ReportView};
pub use tui::{Action, ActionCategory, App};
