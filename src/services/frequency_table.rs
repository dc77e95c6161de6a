use tracing::debug;

use crate::core::{ColumnProfile, Formatter, Percent, RowKey, TableContainer, WidgetId};
use crate::services::view::{BodyCell, BodyRow, TableBody, TableWidgets, WidgetSlot};

pub const FREQUENCY_HEADERS: [&str; 3] = ["Value", "Count", "Percent"];

/// One value of the selected column and how often it occurs
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    pub key: RowKey,
    pub value: String,
    pub count: u64,
    pub percent: Percent,
}

/// Owns the frequency-table widget; every rebuild replaces the whole body
#[derive(Debug, Default)]
pub struct FrequencyTableBuilder {
    formatter: Formatter,
    slot: WidgetSlot,
    row_count: usize,
}

impl FrequencyTableBuilder {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            ..Self::default()
        }
    }

    /// Rows in the column's stored value order
    pub fn build(&self, column: &ColumnProfile) -> Vec<FrequencyRow> {
        column
            .value_counts
            .iter()
            .enumerate()
            .map(|(index, (value, count))| FrequencyRow {
                key: RowKey::new(index),
                value: value.to_string(),
                count,
                percent: self.formatter.percent(count, column.record_count),
            })
            .collect()
    }

    pub fn body(rows: &[FrequencyRow]) -> TableBody {
        TableBody {
            headers: FREQUENCY_HEADERS.to_vec(),
            rows: rows
                .iter()
                .map(|row| BodyRow {
                    key: row.key,
                    cells: vec![
                        BodyCell::Text(row.value.clone()),
                        BodyCell::Count(row.count),
                        BodyCell::Percent(row.percent),
                    ],
                })
                .collect(),
        }
    }

    /// Destroy the previous table widget and build a fresh one for `column`
    pub fn rebuild<V: TableWidgets + ?Sized>(
        &mut self,
        column: &ColumnProfile,
        view: &mut V,
    ) -> WidgetId {
        let rows = self.build(column);
        let body = Self::body(&rows);
        self.row_count = rows.len();
        let id = self.slot.rebuild(
            view,
            |v, old| v.destroy_table(old),
            |v| v.init_table(TableContainer::Frequencies, body),
        );
        debug!(table = %id, rows = self.row_count, "rebuilt frequency table");
        id
    }

    pub fn clear<V: TableWidgets + ?Sized>(&mut self, view: &mut V) {
        self.slot.dispose(view, |v, old| v.destroy_table(old));
        self.row_count = 0;
    }

    pub fn handle(&self) -> Option<WidgetId> {
        self.slot.handle()
    }

    pub fn teardowns(&self) -> usize {
        self.slot.teardowns()
    }

    /// Rows in the live table
    pub fn row_count(&self) -> usize {
        self.row_count
    }
}
