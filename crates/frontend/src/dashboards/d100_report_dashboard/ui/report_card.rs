use contracts::domain::a001_report::Report;
use leptos::prelude::*;

use crate::shared::date_utils::format_date;

/// Clickable summary of one report
#[component]
pub fn ReportCard(
    report: Report,
    /// Whether this card is the active selection
    #[prop(into)]
    selected: Signal<bool>,
    on_select: Callback<i64>,
) -> impl IntoView {
    let id = report.id;
    let created = format_date(&report.created_at);
    let kind = report
        .chart_kind()
        .map(|k| k.display_name())
        .unwrap_or("Unknown");

    view! {
        <div
            class=move || {
                if selected.get() {
                    "report-card report-card--selected"
                } else {
                    "report-card"
                }
            }
            on:click=move |_| on_select.run(id)
        >
            <h3 class="report-card__title">{report.title}</h3>
            <p class="report-card__meta">
                <span>{created}</span>
                <span class="report-card__kind">{kind}</span>
            </p>
        </div>
    }
}
