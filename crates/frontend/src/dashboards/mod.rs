pub mod d100_report_dashboard;

pub use d100_report_dashboard::ui::ReportDashboard;
