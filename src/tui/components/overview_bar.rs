use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::core::PLACEHOLDER;
use crate::services::report_model::FileOverview;
use crate::tui::{Action, Component, Theme};

/// One-line summary of the profiled file
#[derive(Debug, Default)]
pub struct OverviewBar {
    overview: Option<FileOverview>,
}

impl OverviewBar {
    pub fn overview(&self) -> Option<&FileOverview> {
        self.overview.as_ref()
    }

    pub fn set_overview(&mut self, overview: FileOverview) {
        self.overview = Some(overview);
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { PLACEHOLDER } else { value }
}

impl Component for OverviewBar {
    fn handle_action(&mut self, _action: Action) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let line = match &self.overview {
            Some(o) => {
                let field = |label: &'static str, value: String| {
                    [
                        Span::styled(format!("{label} "), theme.muted_style()),
                        Span::styled(value, theme.normal_style()),
                        Span::raw("   "),
                    ]
                };
                Line::from(
                    [
                        field("File", or_placeholder(&o.source_file).to_string()),
                        field("Generated", o.generated_at.clone()),
                        field("Rows", o.row_count.to_string()),
                        field("Columns", o.column_count.to_string()),
                    ]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>(),
                )
            }
            None => Line::from(Span::styled("No report loaded", theme.muted_style())),
        };

        let title = self
            .overview
            .as_ref()
            .map(|o| format!(" {} ", or_placeholder(&o.name)))
            .unwrap_or_default();
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_style(theme.header_style())
                .border_style(theme.border_style()),
        );
        frame.render_widget(paragraph, area);
    }

    fn supported_actions(&self) -> &[Action] {
        &[]
    }

    fn name(&self) -> &str {
        "OverviewBar"
    }
}
