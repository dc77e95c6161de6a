use tracing::{debug, info};

use crate::core::{Formatter, SelectionError, SelectionState};
use crate::services::column_table::ColumnTableBuilder;
use crate::services::detail_panel::DetailPanelBinder;
use crate::services::distribution_chart::DistributionChartBuilder;
use crate::services::frequency_table::FrequencyTableBuilder;
use crate::services::report_model::ReportModel;
use crate::services::view::ReportView;

/// Result of a successful `activate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A different column became active and every panel was rebuilt
    Activated(usize),
    /// The column was already active; nothing was touched
    Unchanged(usize),
}

/// Owns the active column and fans each change out to the detail renderers
///
/// An activation either completes fully (marker moved, detail, chart and
/// frequency table rebuilt, view scrolled) or, on error, changes nothing.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    detail: DetailPanelBinder,
    chart: DistributionChartBuilder,
    frequency: FrequencyTableBuilder,
    activations: usize,
}

impl SelectionController {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            state: SelectionState::NoSelection,
            detail: DetailPanelBinder::new(formatter),
            chart: DistributionChartBuilder::new(),
            frequency: FrequencyTableBuilder::new(formatter),
            activations: 0,
        }
    }

    pub fn activate<V: ReportView + ?Sized>(
        &mut self,
        position: usize,
        model: &ReportModel,
        column_table: &mut ColumnTableBuilder,
        view: &mut V,
    ) -> Result<Activation, SelectionError> {
        if self.state.is_selected(position) {
            debug!(position, "column already active");
            return Ok(Activation::Unchanged(position));
        }

        let column = model
            .column(position)
            .map_err(|_| SelectionError::OutOfRange {
                position,
                column_count: model.column_count(),
            })?;

        column_table.set_active(Some(position), view);
        self.state = SelectionState::Selected(position);

        let row_count = model.document().row_count;
        self.detail.bind(position, column, row_count, view);
        self.chart.rebuild(column, view);
        self.frequency.rebuild(column, view);
        view.scroll_to_detail();

        self.activations += 1;
        info!(position, column = %column.name, "activated column");
        Ok(Activation::Activated(position))
    }

    /// Drop the selection and dispose of every per-column widget
    pub fn reset<V: ReportView + ?Sized>(&mut self, column_table: &mut ColumnTableBuilder, view: &mut V) {
        self.state = SelectionState::NoSelection;
        column_table.set_active(None, view);
        self.chart.clear(view);
        self.frequency.clear(view);
        view.clear_detail();
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn active_position(&self) -> Option<usize> {
        self.state.position()
    }

    /// Completed activations (no-ops and failures excluded)
    pub fn activations(&self) -> usize {
        self.activations
    }

    pub fn chart(&self) -> &DistributionChartBuilder {
        &self.chart
    }

    pub fn frequency(&self) -> &FrequencyTableBuilder {
        &self.frequency
    }
}
