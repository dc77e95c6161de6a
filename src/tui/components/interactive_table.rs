use std::cmp::Ordering;

use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::core::RowKey;
use crate::services::view::TableBody;
use crate::tui::{Action, Component, Focusable, Theme};

const MAX_COLUMN_WIDTH: usize = 32;
const ACTIVE_MARKER: &str = "▶";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub direction: SortDirection,
}

/// Sortable, paginated table over a [`TableBody`]
///
/// Rows keep their [`RowKey`] through sorting, so the cursor and the active
/// marker follow the row rather than the screen position.
pub struct InteractiveTable {
    title: String,
    body: TableBody,
    /// Display order as indexes into `body.rows`
    order: Vec<usize>,
    cursor: usize,
    top: usize,
    height: usize,
    sort: Option<SortKey>,
    active: Option<RowKey>,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl InteractiveTable {
    pub fn new(title: impl Into<String>, body: TableBody) -> Self {
        Self {
            title: title.into(),
            order: (0..body.len()).collect(),
            body,
            cursor: 0,
            top: 0,
            height: 10, // updated on render
            sort: None,
            active: None,
            focused: false,
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::PageUp,
                Action::PageDown,
                Action::GoToTop,
                Action::GoToBottom,
                Action::Sort,
                Action::ReverseSort,
            ],
        }
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Key of the row under the cursor
    pub fn cursor_key(&self) -> Option<RowKey> {
        self.order
            .get(self.cursor)
            .and_then(|&i| self.body.rows.get(i))
            .map(|row| row.key)
    }

    /// Row keys in display order
    pub fn visible_keys(&self) -> Vec<RowKey> {
        self.order
            .iter()
            .filter_map(|&i| self.body.rows.get(i))
            .map(|row| row.key)
            .collect()
    }

    pub fn active(&self) -> Option<RowKey> {
        self.active
    }

    pub fn set_active(&mut self, key: Option<RowKey>) {
        self.active = key;
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// Put the cursor on `key` if the row exists
    pub fn move_cursor_to(&mut self, key: RowKey) {
        if let Some(pos) = self.visible_keys().iter().position(|k| *k == key) {
            self.cursor = pos;
            self.ensure_cursor_visible();
        }
    }

    /// Cycle the sort column: unsorted, then each column ascending, then unsorted
    pub fn sort_next(&mut self) {
        let columns = self.body.headers.len();
        self.sort = match self.sort {
            None if columns > 0 => Some(SortKey {
                column: 0,
                direction: SortDirection::Ascending,
            }),
            Some(key) if key.column + 1 < columns => Some(SortKey {
                column: key.column + 1,
                direction: SortDirection::Ascending,
            }),
            _ => None,
        };
        self.apply_sort();
    }

    pub fn reverse_sort(&mut self) {
        self.sort = match self.sort {
            Some(key) => Some(SortKey {
                column: key.column,
                direction: match key.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            }),
            None if !self.body.headers.is_empty() => Some(SortKey {
                column: 0,
                direction: SortDirection::Descending,
            }),
            None => None,
        };
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let keep = self.cursor_key();
        self.order = (0..self.body.len()).collect();
        if let Some(key) = self.sort {
            let rows = &self.body.rows;
            // stable, so ties keep builder order
            self.order.sort_by(|&a, &b| {
                match (rows[a].cells.get(key.column), rows[b].cells.get(key.column)) {
                    (Some(x), Some(y)) => {
                        let ord = x.sort_cmp(y);
                        // missing values stay last in both directions
                        if key.direction == SortDirection::Descending
                            && !x.is_missing()
                            && !y.is_missing()
                        {
                            ord.reverse()
                        } else {
                            ord
                        }
                    }
                    _ => Ordering::Equal,
                }
            });
        }
        match keep {
            Some(key) => self.move_cursor_to(key),
            None => self.cursor = 0,
        }
    }

    fn update_viewport(&mut self, area: Rect) {
        // borders and header
        self.height = (area.height.saturating_sub(3) as usize).max(1);
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + self.height {
            self.top = self.cursor + 1 - self.height;
        }
    }

    fn last(&self) -> usize {
        self.len().saturating_sub(1)
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.ensure_cursor_visible();
    }

    fn move_down(&mut self) {
        self.cursor = (self.cursor + 1).min(self.last());
        self.ensure_cursor_visible();
    }

    fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.height);
        self.ensure_cursor_visible();
    }

    fn page_down(&mut self) {
        self.cursor = (self.cursor + self.height).min(self.last());
        self.ensure_cursor_visible();
    }

    fn go_to_top(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    fn go_to_bottom(&mut self) {
        self.cursor = self.last();
        self.ensure_cursor_visible();
    }

    fn column_widths(&self) -> Vec<Constraint> {
        let mut widths: Vec<usize> = self.body.headers.iter().map(|h| h.chars().count() + 2).collect();
        for row in &self.body.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.to_string().chars().count());
                }
            }
        }
        std::iter::once(Constraint::Length(1))
            .chain(
                widths
                    .into_iter()
                    .map(|w| Constraint::Length(w.min(MAX_COLUMN_WIDTH) as u16)),
            )
            .collect()
    }

    fn title_text(&self) -> String {
        let position = if self.is_empty() { 0 } else { self.cursor + 1 };
        let mut title = format!(" {} [{}/{}]", self.title, position, self.len());
        if let Some(key) = self.sort {
            if let Some(header) = self.body.headers.get(key.column) {
                let arrow = match key.direction {
                    SortDirection::Ascending => "▲",
                    SortDirection::Descending => "▼",
                };
                title.push_str(&format!(" sorted by {header} {arrow}"));
            }
        }
        title.push(' ');
        title
    }
}

impl Component for InteractiveTable {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::Sort => self.sort_next(),
            Action::ReverseSort => self.reverse_sort(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.update_viewport(area);

        let header_cells = std::iter::once(Cell::from(" ")).chain(self.body.headers.iter().enumerate().map(
            |(i, name)| match self.sort {
                Some(key) if key.column == i => {
                    let arrow = if key.direction == SortDirection::Ascending { "▲" } else { "▼" };
                    Cell::from(format!("{name}{arrow}"))
                }
                _ => Cell::from(*name),
            },
        ));
        let header = Row::new(header_cells).style(theme.header_style());

        let rows: Vec<Row> = self
            .order
            .iter()
            .enumerate()
            .skip(self.top)
            .take(self.height)
            .filter_map(|(display_idx, &i)| self.body.rows.get(i).map(|row| (display_idx, row)))
            .map(|(display_idx, row)| {
                let is_active = Some(row.key) == self.active;
                let marker = Cell::from(if is_active { ACTIVE_MARKER } else { " " });
                let cells = std::iter::once(marker).chain(row.cells.iter().map(|cell| {
                    let text = Cell::from(cell.to_string());
                    if cell.is_missing() { text.style(theme.muted_style()) } else { text }
                }));

                let style = if display_idx == self.cursor && self.focused {
                    theme.selected_style()
                } else if is_active {
                    theme.active_row_style()
                } else if display_idx % 2 == 1 {
                    theme.alt_row_style()
                } else {
                    theme.normal_style()
                };
                Row::new(cells).style(style)
            })
            .collect();

        let table = Table::new(rows, self.column_widths()).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.title_text())
                .border_style(if self.focused {
                    theme.focused_border_style()
                } else {
                    theme.border_style()
                }),
        );

        frame.render_widget(table, area);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        &self.title
    }
}

impl Focusable for InteractiveTable {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DisplayValue, Formatter, Percent};
    use crate::services::view::{BodyCell, BodyRow};
    use ratatui::{Terminal, backend::TestBackend};

    fn body() -> TableBody {
        let row = |i: usize, name: &str, count: u64, missing: bool| BodyRow {
            key: RowKey::new(i),
            cells: vec![
                BodyCell::Text(name.to_string()),
                BodyCell::Count(count),
                if missing {
                    BodyCell::Percent(Percent::Undefined)
                } else {
                    BodyCell::Percent(Formatter::default().percent(count, 10))
                },
            ],
        };
        TableBody {
            headers: vec!["Value", "Count", "Percent"],
            rows: vec![
                row(0, "b", 5, false),
                row(1, "a", 2, true),
                row(2, "c", 3, false),
            ],
        }
    }

    #[test]
    fn test_cursor_movement_is_clamped() {
        let mut table = InteractiveTable::new("Frequencies", body());
        table.handle_action(Action::MoveUp).unwrap();
        assert_eq!(table.cursor_key(), Some(RowKey::new(0)));

        table.handle_action(Action::GoToBottom).unwrap();
        table.handle_action(Action::MoveDown).unwrap();
        assert_eq!(table.cursor_key(), Some(RowKey::new(2)));

        table.handle_action(Action::PageUp).unwrap();
        assert_eq!(table.cursor_key(), Some(RowKey::new(0)));
        assert!(!table.handle_action(Action::Quit).unwrap());
    }

    #[test]
    fn test_sort_cycle_keeps_cursor_on_row() {
        let mut table = InteractiveTable::new("Frequencies", body());
        table.move_cursor_to(RowKey::new(2));

        table.sort_next(); // Value ascending
        assert_eq!(
            table.visible_keys(),
            vec![RowKey::new(1), RowKey::new(0), RowKey::new(2)]
        );
        assert_eq!(table.cursor_key(), Some(RowKey::new(2)));

        table.sort_next(); // Count ascending
        assert_eq!(
            table.visible_keys(),
            vec![RowKey::new(1), RowKey::new(2), RowKey::new(0)]
        );

        table.reverse_sort(); // Count descending
        assert_eq!(
            table.visible_keys(),
            vec![RowKey::new(0), RowKey::new(2), RowKey::new(1)]
        );

        table.sort_next(); // Percent ascending
        table.sort_next(); // back to builder order
        assert_eq!(table.sort(), None);
        assert_eq!(
            table.visible_keys(),
            vec![RowKey::new(0), RowKey::new(1), RowKey::new(2)]
        );
    }

    #[test]
    fn test_missing_values_sort_last_both_ways() {
        let mut table = InteractiveTable::new("Frequencies", body());
        table.sort_next();
        table.sort_next();
        table.sort_next(); // Percent ascending
        assert_eq!(table.visible_keys().last(), Some(&RowKey::new(1)));
        table.reverse_sort();
        assert_eq!(table.visible_keys().last(), Some(&RowKey::new(1)));
    }

    #[test]
    fn test_paging_uses_viewport_height() {
        let rows = (0..50)
            .map(|i| BodyRow {
                key: RowKey::new(i),
                cells: vec![BodyCell::Value(DisplayValue::from(i as i64))],
            })
            .collect();
        let mut table = InteractiveTable::new(
            "Columns",
            TableBody {
                headers: vec!["#"],
                rows,
            },
        );
        let backend = TestBackend::new(40, 13);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                table.render(f, area, &Theme::default());
            })
            .unwrap();

        table.handle_action(Action::PageDown).unwrap();
        assert_eq!(table.cursor_key(), Some(RowKey::new(10)));
        table.handle_action(Action::PageDown).unwrap();
        assert_eq!(table.cursor_key(), Some(RowKey::new(20)));
    }

    #[test]
    fn test_render_shows_active_marker() {
        let mut table = InteractiveTable::new("Columns", body());
        table.set_active(Some(RowKey::new(1)));

        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                table.render(f, area, &Theme::default());
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Columns [1/3]"));
        assert!(text.contains(ACTIVE_MARKER));
    }
}
