use std::path::PathBuf;

use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{info, warn};

use crate::core::{Formatter, RowKey, TableContainer};
use crate::services::view::OverviewView;
use crate::services::{ReportController, ReportModel};
use crate::tui::{Action, ActionCategory, Component, Focusable, KeyBindings, Theme, TuiView};

/// The pane that receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Focus {
    Columns,
    Detail,
    Frequencies,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Columns => Focus::Detail,
            Focus::Detail => Focus::Frequencies,
            Focus::Frequencies => Focus::Columns,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Columns => Focus::Frequencies,
            Focus::Detail => Focus::Columns,
            Focus::Frequencies => Focus::Detail,
        }
    }

    fn container(self) -> Option<TableContainer> {
        match self {
            Focus::Columns => Some(TableContainer::Columns),
            Focus::Frequencies => Some(TableContainer::Frequencies),
            Focus::Detail => None,
        }
    }
}

/// Application state
///
/// Owns the report controller (and through it the ratatui view), routes
/// key events to actions and lays out the screen.
pub struct App {
    controller: ReportController<TuiView>,

    /// File the report was read from, for Refresh
    source: Option<PathBuf>,

    keybindings: KeyBindings,
    theme: Theme,
    focus: Focus,
    show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(model: ReportModel, formatter: Formatter) -> Self {
        let controller = ReportController::mount_with(model, TuiView::new(), formatter);
        Self {
            controller,
            source: None,
            keybindings: KeyBindings::default(),
            theme: Theme::default(),
            focus: Focus::Columns,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.source = Some(path);
        self
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, ignore release/repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }
        Ok(())
    }

    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        if self.show_help {
            match action {
                Action::ToggleHelp | Action::Cancel => self.show_help = false,
                Action::Quit => self.should_quit = true,
                _ => {}
            }
            return Ok(());
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.show_help = true,
            Action::Cancel => self.controller.view_mut().clear_status(),
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::Refresh => self.reload(),
            Action::NextColumn => {
                self.controller.step(true);
                self.follow_active();
            }
            Action::PrevColumn => {
                self.controller.step(false);
                self.follow_active();
            }
            Action::Confirm => self.confirm(),
            other => {
                self.route(other)?;
            }
        }
        Ok(())
    }

    /// Activate the row under the cursor of the focused table
    fn confirm(&mut self) {
        let key = self
            .focus
            .container()
            .and_then(|container| self.controller.view().confirm(container));
        if let Some(key) = key {
            self.controller.activate_row(key);
        }
    }

    /// Keep the column-table cursor on the active column
    fn follow_active(&mut self) {
        if let Some(position) = self.controller.active_position() {
            if let Some(table) = self.controller.view_mut().table_mut(TableContainer::Columns) {
                table.move_cursor_to(RowKey::new(position));
            }
        }
    }

    fn route(&mut self, action: Action) -> Result<bool> {
        let view = self.controller.view_mut();
        match self.focus.container() {
            Some(container) => match view.table_mut(container) {
                Some(table) => table.handle_action(action),
                None => Ok(false),
            },
            None => view.detail_mut().handle_action(action),
        }
    }

    fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            self.controller
                .view_mut()
                .report_error("report was not read from a file; nothing to reload");
            return;
        };
        match ReportModel::from_path(&path) {
            Ok(model) => {
                self.controller.reload(model);
                self.controller.view_mut().clear_status();
                info!(path = %path.display(), "report reloaded");
            }
            Err(err) => {
                warn!(error = %err, "report reload failed");
                self.controller.view_mut().report_error(&err.to_string());
            }
        }
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        let view = self.controller.view_mut();
        for container in [TableContainer::Columns, TableContainer::Frequencies] {
            if let Some(table) = view.table_mut(container) {
                table.set_focused(focus.container() == Some(container));
            }
        }
        view.detail_mut().set_focused(focus == Focus::Detail);
    }

    fn key_hint(&self, action: Action, label: &str) -> Option<String> {
        self.keybindings
            .get_keys_for_action(action)
            .first()
            .map(|key| format!("{key} {label}"))
    }

    fn hints(&self) -> String {
        [
            (Action::Confirm, "select"),
            (Action::NextColumn, "next"),
            (Action::PrevColumn, "prev"),
            (Action::FocusNext, "focus"),
            (Action::Sort, "sort"),
            (Action::ToggleHelp, "help"),
            (Action::Quit, "quit"),
        ]
        .into_iter()
        .filter_map(|(action, label)| self.key_hint(action, label))
        .collect::<Vec<_>>()
        .join("  ")
    }

    /// Render the app
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(40),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(36),
                Constraint::Percentage(28),
                Constraint::Percentage(36),
            ])
            .split(chunks[2]);

        self.sync_focus();
        let hints = self.hints();
        let theme = &self.theme;
        let view = self.controller.view_mut();
        view.set_detail_height(panes[0].height);

        view.overview_bar().render(frame, chunks[0], theme);
        match view.table_mut(TableContainer::Columns) {
            Some(table) => table.render(frame, chunks[1], theme),
            None => Self::render_empty(frame, chunks[1], TableContainer::Columns.title(), theme),
        }
        view.detail_mut().render(frame, panes[0], theme);
        match view.chart_mut() {
            Some(chart) => chart.render(frame, panes[1], theme),
            None => Self::render_empty(frame, panes[1], "Distribution", theme),
        }
        match view.table_mut(TableContainer::Frequencies) {
            Some(table) => table.render(frame, panes[2], theme),
            None => Self::render_empty(frame, panes[2], TableContainer::Frequencies.title(), theme),
        }

        let status = match view.status() {
            Some(message) => Span::styled(message.to_string(), theme.error_style()),
            None => Span::styled(hints, theme.muted_style()),
        };
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[3]);

        if self.show_help {
            self.render_help(frame, Self::centered_rect(70, 80, area));
        }
    }

    fn render_empty(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(theme.border_style());
        frame.render_widget(Paragraph::new("").block(block), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for category in ActionCategory::iter() {
            lines.push(Line::from(Span::styled(category.to_string(), self.theme.header_style())));
            for action in Action::all().into_iter().filter(|a| a.category() == category) {
                let keys = self.keybindings.get_keys_for_action(action).join(", ");
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<20}"), self.theme.active_row_style()),
                    Span::raw(action.description()),
                ]));
            }
            lines.push(Line::default());
        }

        let help = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(self.theme.focused_border_style()),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(help, area);
    }

    /// Helper to create centered rectangle
    fn centered_rect(percent_w: u16, percent_h: u16, area: Rect) -> Rect {
        let width = (area.width * percent_w) / 100;
        let height = (area.height * percent_h) / 100;
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn controller(&self) -> &ReportController<TuiView> {
        &self.controller
    }

    pub fn view(&self) -> &TuiView {
        self.controller.view()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn set_keybindings(&mut self, keybindings: KeyBindings) {
        self.keybindings = keybindings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::{Value, json};
    use std::io::Write;

    fn report() -> Value {
        json!({
            "report": {
                "name": "orders",
                "file": "orders.csv",
                "date": "2024-05-02",
                "rows": 4,
                "columns": [
                    {"name": "order_id", "type": "int", "records": 4, "nonNullValues": 4,
                     "distinctValues": 4, "uniqueValues": 4,
                     "valueCounts": {"1": 1, "2": 1, "3": 1, "4": 1}},
                    {"name": "status", "type": "string", "records": 4, "nonNullValues": 4,
                     "duplicateValues": 2, "distinctValues": 2, "nonUniqueValues": 4,
                     "valueCounts": {"shipped": 3, "pending": 1}},
                    {"name": "coupon", "type": "string", "records": 4, "nullValues": 4}
                ]
            }
        })
    }

    fn app() -> App {
        App::new(ReportModel::load(report()).unwrap(), Formatter::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_first_column_active_on_start() {
        let app = app();
        assert_eq!(app.controller().active_position(), Some(0));
        assert_eq!(app.focus(), Focus::Columns);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_confirm_activates_row_under_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.controller().active_position(), Some(1));
        let detail = app.view().detail().panel().unwrap();
        assert_eq!(detail.name, "status");
        assert_eq!(
            app.view()
                .table(TableContainer::Columns)
                .unwrap()
                .active(),
            Some(RowKey::new(1))
        );
    }

    #[test]
    fn test_next_column_moves_cursor_with_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.controller().active_position(), Some(2));
        let columns = app.view().table(TableContainer::Columns).unwrap();
        assert_eq!(columns.cursor_key(), Some(RowKey::new(2)));
        // all-null column: nothing in the frequency table
        assert!(app.view().table(TableContainer::Frequencies).unwrap().is_empty());
    }

    #[test]
    fn test_confirm_in_frequency_table_is_ignored() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Frequencies);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller().active_position(), Some(0));
        assert_eq!(app.controller().selection().activations(), 1);
    }

    #[test]
    fn test_help_overlay_swallows_actions() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help());

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.controller().active_position(), Some(0));

        let screen = draw(&mut app);
        assert!(screen.contains("Column Selection"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help());
    }

    #[test]
    fn test_quit_action() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_smoke() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("orders"));
        assert!(screen.contains("order_id"));
        assert!(screen.contains("Column 0: order_id"));
        assert!(screen.contains("Distribution"));
        assert!(screen.contains("Frequencies"));

        press(&mut app, KeyCode::Char('n'));
        let screen = draw(&mut app);
        assert!(screen.contains("shipped"));
        assert!(screen.contains("75%"));
    }

    #[test]
    fn test_live_tables_titled_like_empty_panes() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains(" Columns ["));
        assert!(screen.contains(" Frequencies ["));
        assert!(!screen.contains(" frequencies ["));
        assert_eq!(
            app.view().table(TableContainer::Frequencies).unwrap().name(),
            "Frequencies"
        );
    }

    #[test]
    fn test_chart_sized_to_detail_region() {
        let mut app = app();
        draw(&mut app);
        press(&mut app, KeyCode::Char('n'));
        let chart = app.view().chart().unwrap();
        assert_eq!(chart.height(), Some(crate::services::view::DetailView::detail_height(app.view())));
    }

    #[test]
    fn test_refresh_without_source_reports_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.view().status().unwrap().contains("nothing to reload"));

        press(&mut app, KeyCode::Esc);
        assert!(app.view().status().is_none());
    }

    #[test]
    fn test_refresh_rereads_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", report()).unwrap();
        let model = ReportModel::from_path(file.path()).unwrap();
        let mut app = App::new(model, Formatter::default()).with_source(file.path().to_path_buf());
        press(&mut app, KeyCode::Char('n'));

        let mut updated = report();
        updated["report"]["name"] = json!("orders v2");
        std::fs::write(file.path(), updated.to_string()).unwrap();
        press(&mut app, KeyCode::Char('r'));

        assert_eq!(app.controller().model().document().name, "orders v2");
        assert_eq!(app.controller().active_position(), Some(0));
        assert!(app.view().status().is_none());
    }
}
