pub mod chart_view;
pub mod dashboard;
pub mod filter_bar;
pub mod report_card;

pub use dashboard::ReportDashboard;
