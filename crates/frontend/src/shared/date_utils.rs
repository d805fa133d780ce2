/// Utilities for date formatting on report cards
use chrono::{DateTime, Utc};

/// Format a report timestamp as DD.MM.YYYY
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024"
pub fn format_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%d.%m.%Y").to_string()
}
