use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::ChartKind;

// ============================================================================
// Aggregate
// ============================================================================

/// A previously generated report.
///
/// Field names on the wire are fixed (`titulo`, `tipo`, `resultado`,
/// `criado_em`); the Rust names are the semantic ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,

    #[serde(rename = "titulo")]
    pub title: String,

    /// Raw chart kind code. Kept as a string so that values outside the
    /// closed set survive decoding; see [`Report::chart_kind`]. A missing
    /// or null code decodes as `""`, other non-strings as their JSON text.
    #[serde(rename = "tipo", default, deserialize_with = "deserialize_kind")]
    pub kind: String,

    /// Loosely typed result records, in original order
    #[serde(rename = "resultado", default, deserialize_with = "deserialize_records")]
    pub result: Vec<Value>,

    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Chart kind, or `None` when the stored code is not one we can draw
    pub fn chart_kind(&self) -> Option<ChartKind> {
        ChartKind::from_code(&self.kind)
    }
}

/// Accepts the stored result payload in the shapes the query runner
/// produces: a bare array of records, or an object carrying them under
/// `rows`. Anything else yields no records.
pub fn records_from_value(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("rows") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(code)) => code,
        Some(other) => other.to_string(),
    })
}

fn deserialize_records<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(records_from_value).unwrap_or_default())
}

// ============================================================================
// List responses
// ============================================================================

/// Body of `GET /api/v1/relatorios/` as accepted by clients.
///
/// The backend may answer with a bare array or with an envelope exposing
/// the array under `results`; both unwrap to the same list. The shape is
/// picked first so that a broken report surfaces its own decode error.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportList(Vec<Report>);

impl ReportList {
    pub fn into_reports(self) -> Vec<Report> {
        self.0
    }
}

impl<'de> Deserialize<'de> for ReportList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(items)) => items,
                Some(_) => return Err(D::Error::custom("`results` is not an array")),
                None => return Err(D::Error::custom("expected an array or an object with `results`")),
            },
            _ => return Err(D::Error::custom("expected an array or an object with `results`")),
        };

        let reports = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                Report::deserialize(item).map_err(|e| D::Error::custom(format!("report #{}: {}", idx, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ReportList(reports))
    }
}

/// Envelope the bundled backend answers with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListEnvelope {
    pub count: usize,
    pub results: Vec<Report>,
}

impl From<Vec<Report>> for ReportListEnvelope {
    fn from(results: Vec<Report>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_report(id: i64, tipo: &str, resultado: Value) -> Value {
        json!({
            "id": id,
            "titulo": format!("Report {}", id),
            "tipo": tipo,
            "resultado": resultado,
            "criado_em": "2024-03-15T14:02:26.123456Z",
        })
    }

    #[test]
    fn test_decodes_wire_names() {
        let report: Report =
            serde_json::from_value(wire_report(7, "bar", json!([{"label": "X", "value": 3}])))
                .unwrap();
        assert_eq!(report.id, 7);
        assert_eq!(report.title, "Report 7");
        assert_eq!(report.chart_kind(), Some(ChartKind::Bar));
        assert_eq!(report.result.len(), 1);
        assert_eq!(
            report.created_at.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_unknown_kind_survives_decoding() {
        let report: Report = serde_json::from_value(wire_report(1, "radar", json!([]))).unwrap();
        assert_eq!(report.kind, "radar");
        assert_eq!(report.chart_kind(), None);
    }

    #[test]
    fn test_result_shapes() {
        let rows: Report =
            serde_json::from_value(wire_report(1, "pie", json!({"rows": [{"name": "a"}]})))
                .unwrap();
        assert_eq!(rows.result.len(), 1);

        let null: Report = serde_json::from_value(wire_report(2, "pie", Value::Null)).unwrap();
        assert!(null.result.is_empty());

        let scalar: Report = serde_json::from_value(wire_report(3, "pie", json!(42))).unwrap();
        assert!(scalar.result.is_empty());

        let mut missing = wire_report(4, "pie", json!([]));
        missing.as_object_mut().unwrap().remove("resultado");
        let missing: Report = serde_json::from_value(missing).unwrap();
        assert!(missing.result.is_empty());
    }

    #[test]
    fn test_list_accepts_bare_and_envelope() {
        let bare = json!([wire_report(1, "bar", json!([]))]);
        let list: ReportList = serde_json::from_value(bare).unwrap();
        assert_eq!(list.into_reports().len(), 1);

        let envelope = json!({
            "count": 2,
            "results": [wire_report(1, "bar", json!([])), wire_report(2, "line", json!([]))],
        });
        let list: ReportList = serde_json::from_value(envelope).unwrap();
        let ids: Vec<i64> = list.into_reports().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_broken_kind_does_not_reject_the_list() {
        let mut null_kind = wire_report(2, "bar", json!([]));
        null_kind["tipo"] = Value::Null;
        let mut numeric_kind = wire_report(3, "bar", json!([]));
        numeric_kind["tipo"] = json!(7);
        let mut missing_kind = wire_report(4, "bar", json!([]));
        missing_kind.as_object_mut().unwrap().remove("tipo");

        let envelope = json!({
            "results": [wire_report(1, "bar", json!([])), null_kind, numeric_kind, missing_kind],
        });
        let reports = serde_json::from_value::<ReportList>(envelope)
            .unwrap()
            .into_reports();

        let kinds: Vec<&str> = reports.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, vec!["bar", "", "7", ""]);
        assert_eq!(reports[0].chart_kind(), Some(ChartKind::Bar));
        assert!(reports[1..].iter().all(|r| r.chart_kind().is_none()));
    }

    #[test]
    fn test_list_error_names_the_broken_report() {
        let mut broken = wire_report(2, "bar", json!([]));
        broken["criado_em"] = json!("yesterday");
        let bare = json!([wire_report(1, "bar", json!([])), broken]);

        let err = serde_json::from_value::<ReportList>(bare).unwrap_err().to_string();
        assert!(err.starts_with("report #1:"), "unexpected error: {}", err);
    }

    #[test]
    fn test_list_rejects_other_shapes() {
        assert!(serde_json::from_value::<ReportList>(json!({"items": []})).is_err());
        assert!(serde_json::from_value::<ReportList>(json!("nope")).is_err());
        assert!(serde_json::from_value::<ReportList>(json!({"results": 3})).is_err());
    }

    #[test]
    fn test_envelope_round_trips_through_list() {
        let report: Report = serde_json::from_value(wire_report(9, "line", json!([]))).unwrap();
        let body = serde_json::to_string(&ReportListEnvelope::from(vec![report.clone()])).unwrap();
        let list: ReportList = serde_json::from_str(&body).unwrap();
        assert_eq!(list.into_reports(), vec![report]);
    }
}
