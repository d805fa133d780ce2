pub mod chart_kind;
pub mod export_format;

pub use chart_kind::ChartKind;
pub use export_format::ExportFormat;
