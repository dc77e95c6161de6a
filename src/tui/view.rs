//! The ratatui host for the report engine.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::{RowKey, TableContainer, WidgetId};
use crate::services::detail_panel::DetailPanel;
use crate::services::distribution_chart::ChartSeries;
use crate::services::report_model::FileOverview;
use crate::services::view::{ChartWidgets, DetailView, OverviewView, TableBody, TableWidgets};
use crate::tui::components::{ChartPane, DetailPane, InteractiveTable, OverviewBar};

/// Owns every pane of the report screen and hands them to the engine
/// through the view traits.
pub struct TuiView {
    overview: OverviewBar,
    tables: HashMap<TableContainer, (WidgetId, InteractiveTable)>,
    active: HashMap<TableContainer, RowKey>,
    observers: HashSet<TableContainer>,
    detail: DetailPane,
    chart: Option<(WidgetId, ChartPane)>,
    detail_height: u16,
    status: Option<String>,
}

impl Default for TuiView {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiView {
    pub fn new() -> Self {
        Self {
            overview: OverviewBar::default(),
            tables: HashMap::new(),
            active: HashMap::new(),
            observers: HashSet::new(),
            detail: DetailPane::new(),
            chart: None,
            detail_height: 12,
            status: None,
        }
    }

    pub fn overview_bar(&mut self) -> &mut OverviewBar {
        &mut self.overview
    }

    pub fn table(&self, container: TableContainer) -> Option<&InteractiveTable> {
        self.tables.get(&container).map(|(_, table)| table)
    }

    pub fn table_mut(&mut self, container: TableContainer) -> Option<&mut InteractiveTable> {
        self.tables.get_mut(&container).map(|(_, table)| table)
    }

    pub fn detail(&self) -> &DetailPane {
        &self.detail
    }

    pub fn detail_mut(&mut self) -> &mut DetailPane {
        &mut self.detail
    }

    pub fn chart(&self) -> Option<&ChartPane> {
        self.chart.as_ref().map(|(_, chart)| chart)
    }

    pub fn chart_mut(&mut self) -> Option<&mut ChartPane> {
        self.chart.as_mut().map(|(_, chart)| chart)
    }

    /// The row to activate when the user confirms in `container`.
    ///
    /// Only containers with a registered row observer produce activations.
    pub fn confirm(&self, container: TableContainer) -> Option<RowKey> {
        if !self.observers.contains(&container) {
            return None;
        }
        self.table(container).and_then(InteractiveTable::cursor_key)
    }

    /// Track the laid-out detail height; a live chart follows it
    pub fn set_detail_height(&mut self, height: u16) {
        if height == self.detail_height {
            return;
        }
        self.detail_height = height;
        if let Some((_, chart)) = &mut self.chart {
            chart.resize(height);
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn live_widgets(&self) -> usize {
        self.tables.len() + usize::from(self.chart.is_some())
    }
}

impl OverviewView for TuiView {
    fn show_overview(&mut self, overview: &FileOverview) {
        self.overview.set_overview(overview.clone());
    }

    fn report_error(&mut self, message: &str) {
        self.status = Some(message.to_string());
    }
}

impl DetailView for TuiView {
    fn bind_detail(&mut self, panel: &DetailPanel) {
        self.detail.set_panel(panel.clone());
    }

    fn clear_detail(&mut self) {
        self.detail.clear();
    }

    fn detail_height(&self) -> u16 {
        self.detail_height
    }

    fn scroll_to_detail(&mut self) {
        self.detail.scroll_to_top();
    }
}

impl TableWidgets for TuiView {
    fn register_row_observer(&mut self, container: TableContainer) {
        self.observers.insert(container);
    }

    fn init_table(&mut self, container: TableContainer, body: TableBody) -> WidgetId {
        let id = WidgetId::new();
        let mut table = InteractiveTable::new(container.title(), body);
        table.set_active(self.active.get(&container).copied());

        if let Some((old, _)) = self.tables.insert(container, (id, table)) {
            debug!(%old, %container, "table replaced without destroy");
        }
        id
    }

    fn destroy_table(&mut self, id: WidgetId) {
        let container = self
            .tables
            .iter()
            .find(|(_, (live, _))| *live == id)
            .map(|(container, _)| *container);
        match container {
            Some(container) => {
                self.tables.remove(&container);
            }
            None => debug!(%id, "destroy for unknown table"),
        }
    }

    fn mark_active_row(&mut self, container: TableContainer, key: Option<RowKey>) {
        match key {
            Some(key) => self.active.insert(container, key),
            None => self.active.remove(&container),
        };
        if let Some(table) = self.table_mut(container) {
            table.set_active(key);
        }
    }
}

impl ChartWidgets for TuiView {
    fn create_chart(&mut self, series: &ChartSeries) -> WidgetId {
        let id = WidgetId::new();
        self.chart = Some((id, ChartPane::new(series.clone())));
        id
    }

    fn destroy_chart(&mut self, id: WidgetId) {
        if self.chart.as_ref().is_some_and(|(live, _)| *live == id) {
            self.chart = None;
        }
    }

    fn resize_chart(&mut self, id: WidgetId, height: u16) {
        if let Some((live, chart)) = &mut self.chart {
            if *live == id {
                chart.resize(height);
            }
        }
    }
}
