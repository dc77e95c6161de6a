pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod keybindings;
pub mod theme;
pub mod view;

pub use action::{Action, ActionCategory};
pub use app::{App, Focus};
pub use component::{Component, Focusable};
pub use keybindings::{KeyBinding, KeyBindings, KeyPattern};
pub use theme::Theme;
pub use view::TuiView;
