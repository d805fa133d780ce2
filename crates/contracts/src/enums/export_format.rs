use serde::{Deserialize, Serialize};
use std::fmt;

/// Output encodings a report can be exported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Pdf,
}

impl ExportFormat {
    /// Value of the `format` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Button caption
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "Export JSON",
            ExportFormat::Csv => "Export CSV",
            ExportFormat::Pdf => "Export PDF",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.code()
    }

    pub fn all() -> [ExportFormat; 3] {
        [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Pdf]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(ExportFormat::from_code("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_code("xlsx"), None);
    }

    #[test]
    fn test_query_param_shape() {
        let json = serde_json::to_value(ExportFormat::Pdf).unwrap();
        assert_eq!(json, serde_json::json!("pdf"));
    }
}
