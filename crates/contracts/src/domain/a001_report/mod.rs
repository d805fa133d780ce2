pub mod aggregate;
pub mod query;
pub mod series;

pub use aggregate::{Report, ReportList, ReportListEnvelope};
pub use query::{FilterCriteria, ReportQuery};
pub use series::{normalize, Series};
