//! Collaborator contracts between the report engine and whatever draws it.
//!
//! The engine never looks anything up on its own: every region it writes to
//! is reached through one of the traits below, implemented by the host
//! (the ratatui view, the plain-text printer, or a test double).

use std::cmp::Ordering;
use std::fmt;

use crate::core::{DisplayValue, Percent, RowKey, TableContainer, WidgetId};
use crate::services::detail_panel::DetailPanel;
use crate::services::distribution_chart::ChartSeries;
use crate::services::report_model::FileOverview;

/// File-level metadata region plus the host's error surface
pub trait OverviewView {
    fn show_overview(&mut self, overview: &FileOverview);

    /// Surface a non-fatal problem (e.g. a rejected selection) to the user
    fn report_error(&mut self, message: &str);
}

/// Fixed-layout detail region for the selected column
pub trait DetailView {
    fn bind_detail(&mut self, panel: &DetailPanel);

    fn clear_detail(&mut self);

    /// Current height of the detail region, used to size the chart
    fn detail_height(&self) -> u16;

    /// Bring the detail region into view
    fn scroll_to_detail(&mut self);
}

/// The sortable/paginated table widget collaborator
pub trait TableWidgets {
    /// Register the single delegated activation observer for `container`
    fn register_row_observer(&mut self, container: TableContainer);

    /// Replace the body of `container` and construct a widget over it
    fn init_table(&mut self, container: TableContainer, body: TableBody) -> WidgetId;

    fn destroy_table(&mut self, id: WidgetId);

    /// Move the visual active marker; `None` clears it
    fn mark_active_row(&mut self, container: TableContainer, key: Option<RowKey>);
}

/// The bar-chart collaborator
pub trait ChartWidgets {
    fn create_chart(&mut self, series: &ChartSeries) -> WidgetId;

    fn destroy_chart(&mut self, id: WidgetId);

    /// Give the chart's host region an explicit height
    fn resize_chart(&mut self, id: WidgetId, height: u16);
}

/// Everything the report engine needs from its host
pub trait ReportView: OverviewView + DetailView + TableWidgets + ChartWidgets {}

impl<T> ReportView for T where T: OverviewView + DetailView + TableWidgets + ChartWidgets {}

/// An owned, nullable handle to one stateful widget.
///
/// The only way to put a new widget in the slot is [`WidgetSlot::rebuild`],
/// which disposes the previous one first.
#[derive(Debug, Default)]
pub struct WidgetSlot {
    handle: Option<WidgetId>,
    teardowns: usize,
}

impl WidgetSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<WidgetId> {
        self.handle
    }

    /// How many widgets this slot has disposed of so far
    pub fn teardowns(&self) -> usize {
        self.teardowns
    }

    pub fn rebuild<H: ?Sized>(
        &mut self,
        host: &mut H,
        destroy: impl FnOnce(&mut H, WidgetId),
        create: impl FnOnce(&mut H) -> WidgetId,
    ) -> WidgetId {
        self.dispose(host, destroy);
        let id = create(host);
        self.handle = Some(id);
        id
    }

    /// Destroy the current widget, leaving the slot empty
    pub fn dispose<H: ?Sized>(&mut self, host: &mut H, destroy: impl FnOnce(&mut H, WidgetId)) {
        if let Some(old) = self.handle.take() {
            destroy(host, old);
            self.teardowns += 1;
        }
    }
}

/// Rows handed to the table widget, already in builder order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBody {
    pub headers: Vec<&'static str>,
    pub rows: Vec<BodyRow>,
}

impl TableBody {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: RowKey) -> Option<&BodyRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub key: RowKey,
    pub cells: Vec<BodyCell>,
}

/// A typed table cell; the widget sorts on the type, not the rendered text
#[derive(Debug, Clone, PartialEq)]
pub enum BodyCell {
    Text(String),
    Count(u64),
    Percent(Percent),
    Value(DisplayValue),
}

impl BodyCell {
    fn sort_number(&self) -> Option<f64> {
        match self {
            BodyCell::Count(n) => Some(*n as f64),
            BodyCell::Percent(p) => p.value(),
            BodyCell::Value(v) => v.as_json().as_f64(),
            BodyCell::Text(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            BodyCell::Percent(p) => !p.is_defined(),
            BodyCell::Value(v) => v.is_missing(),
            _ => false,
        }
    }

    /// Ordering used by table widgets: missing last, numbers before text
    pub fn sort_cmp(&self, other: &BodyCell) -> Ordering {
        match (self.is_missing(), other.is_missing()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            _ => {}
        }
        match (self.sort_number(), other.sort_number()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for BodyCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyCell::Text(s) => f.write_str(s),
            BodyCell::Count(n) => write!(f, "{n}"),
            BodyCell::Percent(p) => write!(f, "{p}"),
            BodyCell::Value(v) => write!(f, "{v}"),
        }
    }
}
