use std::collections::HashMap;

use crate::core::{RowKey, TableContainer, WidgetId};
use crate::services::detail_panel::DetailPanel;
use crate::services::distribution_chart::ChartSeries;
use crate::services::report_model::FileOverview;
use crate::services::view::{ChartWidgets, DetailView, OverviewView, TableBody, TableWidgets};

/// Headless host that keeps whatever the engine binds in plain fields.
///
/// Backs `--print` and lets the engine be driven without a terminal. It also
/// counts every widget lifecycle call so leaks and double-builds show up.
#[derive(Debug)]
pub struct MemoryView {
    pub overview: Option<FileOverview>,
    pub errors: Vec<String>,
    pub detail: Option<DetailPanel>,
    pub detail_height: u16,
    pub detail_binds: usize,
    pub scrolls: usize,
    pub observers: Vec<TableContainer>,
    pub tables: HashMap<WidgetId, (TableContainer, TableBody)>,
    pub active_rows: HashMap<TableContainer, RowKey>,
    pub charts: HashMap<WidgetId, ChartSeries>,
    pub chart_heights: HashMap<WidgetId, u16>,
    pub tables_created: usize,
    pub tables_destroyed: usize,
    pub charts_created: usize,
    pub charts_destroyed: usize,
    /// Destroy calls for handles that were not live
    pub stale_destroys: usize,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::with_detail_height(24)
    }
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detail_height(detail_height: u16) -> Self {
        Self {
            overview: None,
            errors: Vec::new(),
            detail: None,
            detail_height,
            detail_binds: 0,
            scrolls: 0,
            observers: Vec::new(),
            tables: HashMap::new(),
            active_rows: HashMap::new(),
            charts: HashMap::new(),
            chart_heights: HashMap::new(),
            tables_created: 0,
            tables_destroyed: 0,
            charts_created: 0,
            charts_destroyed: 0,
            stale_destroys: 0,
        }
    }

    /// Live table widgets in `container`
    pub fn live_tables(&self, container: TableContainer) -> usize {
        self.tables.values().filter(|(c, _)| *c == container).count()
    }

    /// The body of the (single) live table in `container`
    pub fn table(&self, container: TableContainer) -> Option<&TableBody> {
        self.tables
            .values()
            .find(|(c, _)| *c == container)
            .map(|(_, body)| body)
    }

    pub fn live_charts(&self) -> usize {
        self.charts.len()
    }

    /// The live chart and the height it was given
    pub fn chart(&self) -> Option<(&ChartSeries, Option<u16>)> {
        self.charts
            .iter()
            .next()
            .map(|(id, series)| (series, self.chart_heights.get(id).copied()))
    }

    pub fn active_row(&self, container: TableContainer) -> Option<RowKey> {
        self.active_rows.get(&container).copied()
    }
}

impl OverviewView for MemoryView {
    fn show_overview(&mut self, overview: &FileOverview) {
        self.overview = Some(overview.clone());
    }

    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

impl DetailView for MemoryView {
    fn bind_detail(&mut self, panel: &DetailPanel) {
        self.detail = Some(panel.clone());
        self.detail_binds += 1;
    }

    fn clear_detail(&mut self) {
        self.detail = None;
    }

    fn detail_height(&self) -> u16 {
        self.detail_height
    }

    fn scroll_to_detail(&mut self) {
        self.scrolls += 1;
    }
}

impl TableWidgets for MemoryView {
    fn register_row_observer(&mut self, container: TableContainer) {
        self.observers.push(container);
    }

    fn init_table(&mut self, container: TableContainer, body: TableBody) -> WidgetId {
        let id = WidgetId::new();
        self.tables.insert(id, (container, body));
        self.tables_created += 1;
        id
    }

    fn destroy_table(&mut self, id: WidgetId) {
        match self.tables.remove(&id) {
            Some((container, _)) => {
                self.tables_destroyed += 1;
                if self.live_tables(container) == 0 {
                    self.active_rows.remove(&container);
                }
            }
            None => self.stale_destroys += 1,
        }
    }

    fn mark_active_row(&mut self, container: TableContainer, key: Option<RowKey>) {
        match key {
            Some(key) => {
                self.active_rows.insert(container, key);
            }
            None => {
                self.active_rows.remove(&container);
            }
        }
    }
}

impl ChartWidgets for MemoryView {
    fn create_chart(&mut self, series: &ChartSeries) -> WidgetId {
        let id = WidgetId::new();
        self.charts.insert(id, series.clone());
        self.charts_created += 1;
        id
    }

    fn destroy_chart(&mut self, id: WidgetId) {
        if self.charts.remove(&id).is_some() {
            self.chart_heights.remove(&id);
            self.charts_destroyed += 1;
        } else {
            self.stale_destroys += 1;
        }
    }

    fn resize_chart(&mut self, id: WidgetId, height: u16) {
        if self.charts.contains_key(&id) {
            self.chart_heights.insert(id, height);
        }
    }
}
