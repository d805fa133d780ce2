use serde::{Deserialize, Serialize};

use crate::enums::ChartKind;

/// Filter state the dashboard holds.
///
/// `None` and an empty (or blank) date are the same "no filter" state;
/// neither ever reaches the outgoing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub kind: Option<ChartKind>,
    pub date: Option<String>,
}

impl FilterCriteria {
    /// Set the kind filter from a select value. `""` and unknown codes
    /// clear it.
    pub fn set_kind_code(&mut self, code: &str) {
        self.kind = ChartKind::from_code(code.trim());
    }

    /// Set the date filter from a date input value (`YYYY-MM-DD`)
    pub fn set_date(&mut self, date: &str) {
        let date = date.trim();
        self.date = if date.is_empty() {
            None
        } else {
            Some(date.to_string())
        };
    }

    pub fn kind_code(&self) -> &'static str {
        self.kind.map(|k| k.code()).unwrap_or("")
    }

    pub fn date_value(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    pub fn to_query(&self) -> ReportQuery {
        ReportQuery {
            tipo: self.kind.map(|k| k.code().to_string()),
            criado_em: self.date.clone(),
        }
        .normalized()
    }
}

/// Query string of `GET /api/v1/relatorios/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    /// Exact creation date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<String>,
}

impl ReportQuery {
    /// Drop parameters that carry no constraint (empty or blank values)
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            tipo: keep(self.tipo),
            criado_em: keep(self.criado_em),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tipo.is_none() && self.criado_em.is_none()
    }
}
