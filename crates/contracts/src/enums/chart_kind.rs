use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart kinds a report can be drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    /// Wire code, as stored in `tipo`
    pub fn code(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        }
    }

    /// Human readable name for filter options
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Pie => "Pie",
        }
    }

    pub fn all() -> [ChartKind; 3] {
        [ChartKind::Bar, ChartKind::Line, ChartKind::Pie]
    }

    /// Parse a wire code. Anything outside the closed set yields `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "bar" => Some(ChartKind::Bar),
            "line" => Some(ChartKind::Line),
            "pie" => Some(ChartKind::Pie),
            _ => None,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_closed_set() {
        for kind in ChartKind::all() {
            assert_eq!(ChartKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ChartKind::from_code("radar"), None);
        assert_eq!(ChartKind::from_code(""), None);
        assert_eq!(ChartKind::from_code("Bar"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&ChartKind::Pie).unwrap(), "\"pie\"");
        let kind: ChartKind = serde_json::from_str("\"line\"").unwrap();
        assert_eq!(kind, ChartKind::Line);
    }
}
