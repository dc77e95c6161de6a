use crate::tui::action::Action;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{Frame, layout::Rect};

/// Base trait for the panes of the report screen
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was handled and consumed.
    /// Returns Ok(false) if the action was not handled and should propagate.
    fn handle_action(&mut self, action: Action) -> Result<bool>;

    /// Render the component within the given area
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Actions this component responds to, for the help overlay
    fn supported_actions(&self) -> &[Action];

    /// Get component name for debugging/logging
    fn name(&self) -> &str;
}

/// Components that can receive keyboard focus
pub trait Focusable: Component {
    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}
