pub mod column_table;
pub mod detail_panel;
pub mod distribution_chart;
pub mod frequency_table;
pub mod report_controller;
pub mod report_model;
pub mod selection;
pub mod view;

pub use column_table::{ColumnRow, ColumnTableBuilder};
pub use detail_panel::{DetailPanel, DetailPanelBinder};
pub use distribution_chart::{ChartSeries, DistributionChartBuilder};
pub use frequency_table::{FrequencyRow, FrequencyTableBuilder};
pub use report_controller::ReportController;
pub use report_model::{FileOverview, ReportModel};
pub use selection::{Activation, SelectionController};
pub use view::{ReportView, TableBody, WidgetSlot};
