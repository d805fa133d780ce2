//! Report dashboard: report list with filters, chart of the selected
//! report, and export actions.

pub mod api;
pub mod chart;
pub mod controller;
pub mod export;
pub mod store;
pub mod svg;
pub mod ui;
