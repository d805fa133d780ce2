use chrono::NaiveDate;
use contracts::domain::a001_report::{normalize, Report};
use contracts::enums::ExportFormat;
use serde_json::Value;
use thiserror::Error;

use super::pdf;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnknownFormat(String),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv buffer: {0}")]
    Buffer(String),
    #[error("pdf render failed: {0}")]
    Pdf(String),
}

/// A rendered export ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Missing format means JSON; anything outside the known set is refused
pub fn parse_format(raw: Option<&str>) -> Result<ExportFormat, ExportError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(ExportFormat::Json),
        Some(code) => {
            ExportFormat::from_code(code).ok_or_else(|| ExportError::UnknownFormat(code.to_string()))
        }
    }
}

/// `relatorio_{id}_{YYYYMMDD}.{ext}`
pub fn export_filename(report_id: i64, format: ExportFormat, day: NaiveDate) -> String {
    format!(
        "relatorio_{}_{}.{}",
        report_id,
        day.format("%Y%m%d"),
        format.extension()
    )
}

pub fn render(report: &Report, format: ExportFormat, day: NaiveDate) -> Result<ExportFile, ExportError> {
    let body = match format {
        ExportFormat::Json => serde_json::to_vec_pretty(&report.result)?,
        ExportFormat::Csv => render_csv(&report.result)?,
        ExportFormat::Pdf => pdf::render_text_page(&report.title, &pdf_lines(report))
            .map_err(ExportError::Pdf)?,
    };

    tracing::debug!(
        "Rendered report {} as {} ({} bytes)",
        report.id,
        format.code(),
        body.len()
    );

    Ok(ExportFile {
        filename: export_filename(report.id, format, day),
        content_type: format.content_type(),
        body,
    })
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Header row from the first record's keys, then one row per record in
/// that column order. Non-object records fill a single cell.
pub fn render_csv(records: &[Value]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let headers: Vec<String> = match records.first() {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };
    if !headers.is_empty() {
        writer.write_record(&headers)?;
    }

    for record in records {
        let row: Vec<String> = match record {
            Value::Object(map) if !headers.is_empty() => {
                headers.iter().map(|h| cell(map.get(h))).collect()
            }
            other => vec![cell(Some(other))],
        };
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

/// Body lines of the PDF listing: metadata, one line per point, total
pub fn pdf_lines(report: &Report) -> Vec<String> {
    let series = normalize(&report.result);
    let mut lines = vec![
        format!("Type: {}", report.kind),
        format!("Created: {}", report.created_at.format("%d.%m.%Y %H:%M UTC")),
        String::new(),
    ];
    if series.is_empty() {
        lines.push("No data".to_string());
    } else {
        lines.extend(
            series
                .points()
                .map(|(label, value)| format!("{}: {}", label, value)),
        );
        lines.push(String::new());
        lines.push(format!("Total: {}", series.total()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn report(result: Vec<Value>) -> Report {
        Report {
            id: 42,
            title: "Monthly costs".to_string(),
            kind: "bar".to_string(),
            result,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format(None).unwrap(), ExportFormat::Json);
        assert_eq!(parse_format(Some("")).unwrap(), ExportFormat::Json);
        assert_eq!(parse_format(Some("csv")).unwrap(), ExportFormat::Csv);
        assert_eq!(parse_format(Some("pdf")).unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            parse_format(Some("xlsx")),
            Err(ExportError::UnknownFormat(f)) if f == "xlsx"
        ));
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            export_filename(42, ExportFormat::Csv, day()),
            "relatorio_42_20240401.csv"
        );
        assert_eq!(
            export_filename(7, ExportFormat::Pdf, day()),
            "relatorio_7_20240401.pdf"
        );
    }

    #[test]
    fn test_csv_uses_first_record_columns() {
        let records = vec![
            json!({ "label": "EC2", "value": 120.5 }),
            json!({ "value": 30, "label": "S3", "extra": true }),
            json!({ "label": "RDS, \"multi-az\"" }),
        ];
        let csv = String::from_utf8(render_csv(&records).unwrap()).unwrap();
        assert_eq!(
            csv,
            "label,value\nEC2,120.5\nS3,30\n\"RDS, \"\"multi-az\"\"\",\n"
        );
    }

    #[test]
    fn test_csv_empty_and_scalar_records() {
        assert!(render_csv(&[]).unwrap().is_empty());

        let csv = String::from_utf8(render_csv(&[json!(1), json!("two"), Value::Null]).unwrap())
            .unwrap();
        assert_eq!(csv, "1\ntwo\n\"\"\n");
    }

    #[test]
    fn test_render_json_is_result_array() {
        let file = render(&report(vec![json!({ "label": "A", "value": 1 })]), ExportFormat::Json, day())
            .unwrap();
        assert_eq!(file.content_type, "application/json");
        assert_eq!(file.filename, "relatorio_42_20240401.json");
        let body: Value = serde_json::from_slice(&file.body).unwrap();
        assert_eq!(body, json!([{ "label": "A", "value": 1 }]));
    }

    #[test]
    fn test_csv_keeps_record_key_order() {
        let records = vec![
            json!({ "value": 1, "label": "a", "comment": "first" }),
            json!({ "label": "b", "value": 2 }),
        ];
        let csv = String::from_utf8(render_csv(&records).unwrap()).unwrap();
        assert_eq!(csv, "value,label,comment\n1,a,first\n2,b,\n");
    }

    #[test]
    fn test_pdf_lines_list_series() {
        let lines = pdf_lines(&report(vec![
            json!({ "name": "EC2", "count": 3 }),
            json!({ "label": "S3", "value": "1.5" }),
        ]));
        assert_eq!(
            lines,
            vec![
                "Type: bar",
                "Created: 15.03.2024 10:30 UTC",
                "",
                "EC2: 3",
                "S3: 1.5",
                "",
                "Total: 4.5",
            ]
        );
    }

    #[test]
    fn test_pdf_lines_without_data() {
        let lines = pdf_lines(&report(Vec::new()));
        assert_eq!(lines.last().map(String::as_str), Some("No data"));
    }

    #[test]
    fn test_render_pdf_attachment() {
        let file = render(&report(vec![json!({ "label": "A", "value": 1 })]), ExportFormat::Pdf, day())
            .unwrap();
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.filename, "relatorio_42_20240401.pdf");
        assert!(file.body.starts_with(b"%PDF-"));
    }
}
