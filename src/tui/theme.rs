use ratatui::style::{Color, Modifier, Style};

use crate::core::Bucket;

/// Color scheme for the report viewer
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // General UI colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Table colors
    pub header_fg: Color,
    pub header_bg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub row_alt_bg: Color, // For zebra striping
    pub active_fg: Color,
    pub muted: Color,

    // Distribution bars
    pub bucket_null: Color,
    pub bucket_duplicate: Color,
    pub bucket_non_unique: Color,
    pub bucket_unique: Color,

    // Status/feedback colors
    pub error: Color,
    pub warning: Color,
}

impl Theme {
    /// Default dark theme
    pub fn default() -> Self {
        Self {
            name: "Default Dark".to_string(),
            background: Color::Reset,
            foreground: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            header_fg: Color::Cyan,
            header_bg: Color::Reset,
            selected_fg: Color::Black,
            selected_bg: Color::Cyan,
            row_alt_bg: Color::Rgb(25, 25, 35), // Slightly lighter than pure black
            active_fg: Color::Yellow,
            muted: Color::DarkGray,
            bucket_null: Color::Red,
            bucket_duplicate: Color::Yellow,
            bucket_non_unique: Color::Magenta,
            bucket_unique: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            border: Color::Gray,
            border_focused: Color::Blue,
            header_fg: Color::Blue,
            header_bg: Color::Rgb(240, 240, 240),
            selected_fg: Color::White,
            selected_bg: Color::Blue,
            row_alt_bg: Color::Rgb(250, 250, 250),
            active_fg: Color::Rgb(170, 90, 0),
            muted: Color::Gray,
            bucket_null: Color::Rgb(190, 40, 40),
            bucket_duplicate: Color::Rgb(200, 150, 0),
            bucket_non_unique: Color::Rgb(140, 60, 160),
            bucket_unique: Color::Rgb(30, 140, 60),
            error: Color::Red,
            warning: Color::Rgb(200, 150, 0), // Darker yellow for light bg
        }
    }

    /// Helper methods to get commonly used styles

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// The column whose details are on screen
    pub fn active_row_style(&self) -> Style {
        Style::default()
            .fg(self.active_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Placeholders and secondary text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn bucket_color(&self, bucket: Bucket) -> Color {
        match bucket {
            Bucket::Null => self.bucket_null,
            Bucket::Duplicate => self.bucket_duplicate,
            Bucket::NonUnique => self.bucket_non_unique,
            Bucket::Unique => self.bucket_unique,
        }
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn alt_row_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.row_alt_bg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }
}
