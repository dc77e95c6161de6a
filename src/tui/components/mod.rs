pub mod chart_pane;
pub mod detail_pane;
pub mod interactive_table;
pub mod overview_bar;

pub use chart_pane::ChartPane;
pub use detail_pane::DetailPane;
pub use interactive_table::{InteractiveTable, SortDirection, SortKey};
pub use overview_bar::OverviewBar;
