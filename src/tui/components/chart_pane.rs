use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Direction, Rect},
    style::Style,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::services::distribution_chart::ChartSeries;
use crate::tui::{Action, Component, Theme};

/// Bar chart of the selected column's value buckets
#[derive(Debug, Default)]
pub struct ChartPane {
    series: ChartSeries,
    height: Option<u16>,
}

impl ChartPane {
    pub fn new(series: ChartSeries) -> Self {
        Self {
            series,
            height: None,
        }
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn height(&self) -> Option<u16> {
        self.height
    }

    pub fn resize(&mut self, height: u16) {
        self.height = Some(height);
    }

    /// The part of `area` the chart occupies once sized
    pub fn region(&self, area: Rect) -> Rect {
        match self.height {
            Some(h) => Rect {
                height: h.min(area.height),
                ..area
            },
            None => area,
        }
    }
}

impl Component for ChartPane {
    fn handle_action(&mut self, _action: Action) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let area = self.region(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Distribution ")
            .border_style(theme.border_style());

        if self.series.is_empty() {
            let empty = Paragraph::new("No values to chart")
                .style(theme.muted_style())
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let bars: Vec<Bar> = self
            .series
            .buckets
            .iter()
            .zip(&self.series.labels)
            .zip(&self.series.values)
            .map(|((bucket, label), value)| {
                Bar::default()
                    .label(label.clone().into())
                    .value(*value)
                    .style(Style::default().fg(theme.bucket_color(*bucket)))
                    .value_style(theme.selected_style())
            })
            .collect();

        // one label row per bar in the horizontal layout
        let inner_height = area.height.saturating_sub(2);
        let bar_width = (inner_height / self.series.len() as u16).clamp(1, 3);

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(bar_width)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }

    fn supported_actions(&self) -> &[Action] {
        &[]
    }

    fn name(&self) -> &str {
        "ChartPane"
    }
}
