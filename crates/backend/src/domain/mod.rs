pub mod a001_report;
pub mod a002_tenant;
