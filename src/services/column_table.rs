use tracing::debug;

use crate::core::{ColumnProfile, DisplayValue, RowKey, TableContainer, WidgetId};
use crate::services::view::{BodyCell, BodyRow, TableBody, TableWidgets, WidgetSlot};

pub const COLUMN_HEADERS: [&str; 10] = [
    "#", "Name", "Type", "Non-null", "Null", "Unique", "Distinct", "Min", "Median", "Max",
];

/// Overview row for one column. `position` is the row's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRow {
    pub position: usize,
    pub name: String,
    pub data_type: String,
    pub non_null_values: u64,
    pub null_values: u64,
    pub unique_values: u64,
    pub distinct_values: u64,
    pub min_value: DisplayValue,
    pub median_value: DisplayValue,
    pub max_value: DisplayValue,
    pub active: bool,
}

impl ColumnRow {
    fn from_profile(position: usize, column: &ColumnProfile) -> Self {
        Self {
            position,
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            non_null_values: column.non_null_values,
            null_values: column.null_values,
            unique_values: column.unique_values,
            distinct_values: column.distinct_values,
            min_value: column.min_value.clone(),
            median_value: column.median_value.clone(),
            max_value: column.max_value.clone(),
            active: false,
        }
    }

    pub fn key(&self) -> RowKey {
        RowKey::new(self.position)
    }

    fn body_row(&self) -> BodyRow {
        BodyRow {
            key: self.key(),
            cells: vec![
                BodyCell::Count(self.position as u64),
                BodyCell::Text(self.name.clone()),
                BodyCell::Text(self.data_type.clone()),
                BodyCell::Count(self.non_null_values),
                BodyCell::Count(self.null_values),
                BodyCell::Count(self.unique_values),
                BodyCell::Count(self.distinct_values),
                BodyCell::Value(self.min_value.clone()),
                BodyCell::Value(self.median_value.clone()),
                BodyCell::Value(self.max_value.clone()),
            ],
        }
    }
}

/// Builds the all-columns table and resolves row activations back to columns
#[derive(Debug, Default)]
pub struct ColumnTableBuilder {
    rows: Vec<ColumnRow>,
    slot: WidgetSlot,
    observing: bool,
}

impl ColumnTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the table for `columns`.
    ///
    /// Returns the position to select initially, or `None` for a report
    /// without columns.
    pub fn render<V: TableWidgets + ?Sized>(
        &mut self,
        columns: &[ColumnProfile],
        view: &mut V,
    ) -> Option<usize> {
        if !self.observing {
            view.register_row_observer(TableContainer::Columns);
            self.observing = true;
        }

        self.rows = columns
            .iter()
            .enumerate()
            .map(|(position, column)| ColumnRow::from_profile(position, column))
            .collect();
        let body = self.body();
        let id = self.slot.rebuild(
            view,
            |v, old| v.destroy_table(old),
            |v| v.init_table(TableContainer::Columns, body),
        );
        debug!(table = %id, rows = self.rows.len(), "rendered column table");

        (!self.rows.is_empty()).then_some(0)
    }

    pub fn body(&self) -> TableBody {
        TableBody {
            headers: COLUMN_HEADERS.to_vec(),
            rows: self.rows.iter().map(ColumnRow::body_row).collect(),
        }
    }

    /// Resolve an activated row to its column position
    pub fn lookup(&self, key: RowKey) -> Option<usize> {
        self.rows
            .iter()
            .find(|row| row.key() == key)
            .map(|row| row.position)
    }

    /// Make `position` the only active row; `None` clears the marker
    pub fn set_active<V: TableWidgets + ?Sized>(&mut self, position: Option<usize>, view: &mut V) {
        for row in &mut self.rows {
            row.active = Some(row.position) == position;
        }
        view.mark_active_row(TableContainer::Columns, position.map(RowKey::new));
    }

    pub fn active_rows(&self) -> impl Iterator<Item = &ColumnRow> {
        self.rows.iter().filter(|row| row.active)
    }

    pub fn rows(&self) -> &[ColumnRow] {
        &self.rows
    }

    pub fn handle(&self) -> Option<WidgetId> {
        self.slot.handle()
    }

    pub fn teardowns(&self) -> usize {
        self.slot.teardowns()
    }
}
