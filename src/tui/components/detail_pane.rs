use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::core::PLACEHOLDER;
use crate::services::detail_panel::DetailPanel;
use crate::tui::{Action, Component, Focusable, Theme};

const LABEL_WIDTH: usize = 14;

/// Scrollable statistics of the selected column
pub struct DetailPane {
    panel: Option<DetailPanel>,
    scroll: u16,
    line_count: u16,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl Default for DetailPane {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailPane {
    pub fn new() -> Self {
        Self {
            panel: None,
            scroll: 0,
            line_count: 0,
            focused: false,
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::PageUp,
                Action::PageDown,
                Action::GoToTop,
                Action::GoToBottom,
            ],
        }
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        self.panel.as_ref()
    }

    pub fn set_panel(&mut self, panel: DetailPanel) {
        self.panel = Some(panel);
    }

    pub fn clear(&mut self) {
        self.panel = None;
        self.scroll = 0;
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.line_count.saturating_sub(1) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max.max(0)) as u16;
    }

    fn lines<'a>(panel: &'a DetailPanel, theme: &Theme) -> Vec<Line<'a>> {
        let row = |label: String, value: String| {
            let style = if value.starts_with(PLACEHOLDER) {
                theme.muted_style()
            } else {
                theme.normal_style()
            };
            Line::from(vec![
                Span::styled(format!("{label:<width$}", width = LABEL_WIDTH), theme.header_style()),
                Span::styled(value, style),
            ])
        };

        let mut lines = vec![
            row("Type".to_string(), panel.data_type.clone()),
            row("Records".to_string(), panel.record_count.to_string()),
            Line::default(),
        ];
        for stat in &panel.value_stats {
            let frequency = stat
                .frequency
                .map_or_else(|| PLACEHOLDER.to_string(), |f| format!("x{f}"));
            lines.push(row(format!("{} value", stat.label), format!("{}  ({frequency})", stat.value)));
        }
        lines.push(Line::default());
        for ratio in &panel.ratios {
            lines.push(row(ratio.label.to_string(), format!("{:<8} {}", ratio.count, ratio.percent)));
        }
        lines.push(Line::default());
        for length in &panel.lengths {
            lines.push(row(format!("{} length", length.label), length.value.clone()));
        }
        if !panel.issues.is_empty() {
            lines.push(Line::default());
            for issue in &panel.issues {
                lines.push(Line::from(Span::styled(
                    format!("! {issue}"),
                    theme.warning_style().add_modifier(Modifier::ITALIC),
                )));
            }
        }
        lines
    }
}

impl Component for DetailPane {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => self.scroll_by(-1),
            Action::MoveDown => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-10),
            Action::PageDown => self.scroll_by(10),
            Action::GoToTop => self.scroll = 0,
            Action::GoToBottom => self.scroll_by(i32::from(u16::MAX)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };

        let (title, lines) = match &self.panel {
            Some(panel) => (
                format!(" Column {}: {} ", panel.position, panel.name),
                Self::lines(panel, theme),
            ),
            None => (
                " Column ".to_string(),
                vec![Line::from(Span::styled("No column selected", theme.muted_style()))],
            ),
        };
        self.line_count = lines.len() as u16;
        self.scroll = self.scroll.min(self.line_count.saturating_sub(1));

        let paragraph = Paragraph::new(lines).scroll((self.scroll, 0)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );
        frame.render_widget(paragraph, area);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "DetailPane"
    }
}

impl Focusable for DetailPane {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
