use tracing::{info, warn};

use crate::core::{Formatter, RowKey, SelectionError};
use crate::services::column_table::ColumnTableBuilder;
use crate::services::report_model::ReportModel;
use crate::services::selection::{Activation, SelectionController};
use crate::services::view::ReportView;

/// Wires a loaded report to its view
///
/// Mounting binds the file overview, renders the column table and selects
/// the first column. Afterwards every row activation goes through
/// [`ReportController::activate`] / [`ReportController::activate_row`].
pub struct ReportController<V: ReportView> {
    model: ReportModel,
    view: V,
    column_table: ColumnTableBuilder,
    selection: SelectionController,
}

impl<V: ReportView> ReportController<V> {
    pub fn mount(model: ReportModel, view: V) -> Self {
        Self::mount_with(model, view, Formatter::default())
    }

    pub fn mount_with(model: ReportModel, view: V, formatter: Formatter) -> Self {
        let mut controller = Self {
            model,
            view,
            column_table: ColumnTableBuilder::new(),
            selection: SelectionController::new(formatter),
        };
        controller.bind();
        controller
    }

    /// Swap in a freshly loaded report, rebuilding every region
    pub fn reload(&mut self, model: ReportModel) {
        self.selection.reset(&mut self.column_table, &mut self.view);
        self.model = model;
        self.bind();
    }

    fn bind(&mut self) {
        self.view.show_overview(&self.model.overview());
        let first = self
            .column_table
            .render(self.model.columns(), &mut self.view);
        info!(
            columns = self.model.column_count(),
            "report bound to view"
        );
        if let Some(position) = first {
            self.activate(position);
        }
    }

    /// Activate a column by position. Failures are logged and reported to
    /// the view; no panel changes.
    pub fn activate(&mut self, position: usize) -> Option<Activation> {
        let result = self.selection.activate(
            position,
            &self.model,
            &mut self.column_table,
            &mut self.view,
        );
        self.settle(result)
    }

    /// Activate the column behind a row of the column table
    pub fn activate_row(&mut self, key: RowKey) -> Option<Activation> {
        match self.column_table.lookup(key) {
            Some(position) => self.activate(position),
            None => self.settle(Err(SelectionError::StaleRow(key))),
        }
    }

    /// Activate the column after (or before) the active one
    pub fn step(&mut self, forward: bool) -> Option<Activation> {
        let count = self.model.column_count();
        if count == 0 {
            return None;
        }
        let next = match self.selection.active_position() {
            None => 0,
            Some(p) if forward => (p + 1).min(count - 1),
            Some(p) => p.saturating_sub(1),
        };
        self.activate(next)
    }

    fn settle(&mut self, result: Result<Activation, SelectionError>) -> Option<Activation> {
        match result {
            Ok(activation) => Some(activation),
            Err(err) => {
                warn!(error = %err, "column selection rejected");
                self.view.report_error(&err.to_string());
                None
            }
        }
    }

    pub fn model(&self) -> &ReportModel {
        &self.model
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn column_table(&self) -> &ColumnTableBuilder {
        &self.column_table
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn active_position(&self) -> Option<usize> {
        self.selection.active_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bucket, TableContainer};
    use crate::render::MemoryView;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn model() -> ReportModel {
        ReportModel::load(json!({
            "report": {
                "name": "customers",
                "file": "customers.csv",
                "date": "2024-03-01T10:00:00Z",
                "rows": 5,
                "columns": [
                    {"name": "id", "type": "int", "records": 5, "nonNullValues": 5,
                     "distinctValues": 5, "uniqueValues": 5,
                     "valueCounts": {"1": 1, "2": 1, "3": 1, "4": 1, "5": 1}},
                    {"name": "country", "type": "string", "records": 5, "nullValues": 1,
                     "nonNullValues": 4, "duplicateValues": 2, "distinctValues": 2,
                     "nonUniqueValues": 4, "valueCounts": {"NO": 3, "IT": 1}},
                    {"name": "note", "type": "string", "records": 5, "nullValues": 5}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_mount_selects_first_column() {
        let controller = ReportController::mount(model(), MemoryView::new());
        let view = controller.view();

        assert_eq!(controller.active_position(), Some(0));
        assert_eq!(view.overview.as_ref().unwrap().column_count, 3);
        assert_eq!(view.detail.as_ref().unwrap().name, "id");
        assert_eq!(view.observers, vec![TableContainer::Columns]);
        assert_eq!(view.active_row(TableContainer::Columns), Some(RowKey::new(0)));
        assert_eq!(view.live_charts(), 1);
        assert_eq!(view.live_tables(TableContainer::Frequencies), 1);
        assert_eq!(view.scrolls, 1);
    }

    #[test]
    fn test_switch_rebuilds_every_panel() {
        let mut controller = ReportController::mount(model(), MemoryView::new());
        let result = controller.activate(1);
        assert_eq!(result, Some(Activation::Activated(1)));

        let view = controller.view();
        assert_eq!(view.detail.as_ref().unwrap().name, "country");
        assert_eq!(view.active_row(TableContainer::Columns), Some(RowKey::new(1)));

        let (series, height) = view.chart().unwrap();
        assert_eq!(series.value_of(Bucket::Null), Some(1));
        assert_eq!(series.value_of(Bucket::Unique), None);
        assert_eq!(height, Some(view.detail_height));

        let frequencies = view.table(TableContainer::Frequencies).unwrap();
        assert_eq!(frequencies.len(), 2);
        assert_eq!(frequencies.rows[0].cells[0].to_string(), "NO");
        assert_eq!(frequencies.rows[0].cells[2].to_string(), "60%");

        let active: Vec<usize> = controller
            .column_table()
            .active_rows()
            .map(|row| row.position)
            .collect();
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn test_reactivating_active_column_is_noop() {
        let mut controller = ReportController::mount(model(), MemoryView::new());
        let binds = controller.view().detail_binds;
        let created = controller.view().charts_created;

        assert_eq!(controller.activate(0), Some(Activation::Unchanged(0)));
        assert_eq!(controller.view().detail_binds, binds);
        assert_eq!(controller.view().charts_created, created);
        assert_eq!(controller.selection().activations(), 1);
    }

    #[test]
    fn test_out_of_range_leaves_panels_untouched() {
        let mut controller = ReportController::mount(model(), MemoryView::new());
        controller.activate(1);
        let before = controller.view().detail.clone();

        assert_eq!(controller.activate(9), None);
        assert_eq!(controller.active_position(), Some(1));
        assert_eq!(controller.view().detail, before);
        assert_eq!(
            controller.view().active_row(TableContainer::Columns),
            Some(RowKey::new(1))
        );
        assert_eq!(controller.view().errors.len(), 1);
        assert!(controller.view().errors[0].contains("position 9"));
    }

    #[test]
    fn test_repeated_selection_leaves_one_live_widget() {
        let mut controller = ReportController::mount(model(), MemoryView::new());
        for position in [1, 2, 0, 2, 1] {
            controller.activate(position);
        }
        // mount plus five switches
        let selections = 6;
        let view = controller.view();

        assert_eq!(view.live_charts(), 1);
        assert_eq!(view.live_tables(TableContainer::Frequencies), 1);
        assert_eq!(view.charts_created, selections);
        assert_eq!(view.charts_destroyed, selections - 1);
        assert_eq!(controller.selection().chart().teardowns(), selections - 1);
        assert_eq!(controller.selection().frequency().teardowns(), selections - 1);
        assert_eq!(view.stale_destroys, 0);
    }

    #[test]
    fn test_activate_row_resolves_identity() {
        let mut controller = ReportController::mount(model(), MemoryView::new());
        assert_eq!(
            controller.activate_row(RowKey::new(2)),
            Some(Activation::Activated(2))
        );
        assert_eq!(controller.view().detail.as_ref().unwrap().name, "note");

        assert_eq!(controller.activate_row(RowKey::new(5)), None);
        assert_eq!(controller.active_position(), Some(2));
        assert!(controller.view().errors[0].contains("row 5"));
    }

    #[test]
    fn test_step_clamps_at_edges() {
        let mut controller = ReportController::mount(model(), MemoryView::new());
        assert_eq!(controller.step(false), Some(Activation::Unchanged(0)));
        controller.step(true);
        controller.step(true);
        assert_eq!(controller.step(true), Some(Activation::Unchanged(2)));
        assert_eq!(controller.active_position(), Some(2));
    }

    #[test]
    fn test_zero_columns_selects_nothing() {
        let model = ReportModel::load(json!({"report": {"rows": 0, "columns": []}})).unwrap();
        let mut controller = ReportController::mount(model, MemoryView::new());
        let view = controller.view();

        assert_eq!(controller.active_position(), None);
        assert!(view.detail.is_none());
        assert_eq!(view.live_charts(), 0);
        assert_eq!(view.live_tables(TableContainer::Frequencies), 0);
        assert!(view.table(TableContainer::Columns).unwrap().is_empty());
        assert_eq!(controller.step(true), None);
    }

    #[test]
    fn test_reload_replaces_widgets() {
        let mut controller = ReportController::mount(model(), MemoryView::new());
        controller.activate(2);
        controller.reload(model());
        let view = controller.view();

        assert_eq!(controller.active_position(), Some(0));
        assert_eq!(view.live_tables(TableContainer::Columns), 1);
        assert_eq!(view.live_tables(TableContainer::Frequencies), 1);
        assert_eq!(view.live_charts(), 1);
        assert_eq!(view.observers.len(), 1);
        assert_eq!(view.stale_destroys, 0);
    }
}
