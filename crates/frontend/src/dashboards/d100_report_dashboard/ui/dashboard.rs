use contracts::enums::ExportFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::chart_view::ChartView;
use super::filter_bar::FilterBar;
use super::report_card::ReportCard;
use crate::dashboards::d100_report_dashboard::api::HttpReportSource;
use crate::dashboards::d100_report_dashboard::controller::{DashboardController, RenderOutcome};
use crate::dashboards::d100_report_dashboard::export::ExportDispatcher;
use crate::dashboards::d100_report_dashboard::store::{InFlight, ReportStore};
use crate::dashboards::d100_report_dashboard::svg::{ChartFigure, SvgSurface};

/// Report browser: filters, report cards, chart of the selected report
/// and its export actions
#[component]
pub fn ReportDashboard() -> impl IntoView {
    let controller = RwSignal::new(DashboardController::new(ExportDispatcher::for_window()));
    let source = HttpReportSource::new();
    let in_flight = RwSignal::new(InFlight::default());
    let figure = RwSignal::new(None::<ChartFigure>);

    let criteria = Memo::new(move |_| controller.with(|c| c.criteria().clone()));
    let selection = Memo::new(move |_| controller.with(|c| c.selection()));
    let render_key = Memo::new(move |_| controller.with(|c| c.render_key()));

    // Load on mount and again whenever the filters change. Responses are
    // applied in arrival order.
    Effect::new(move |_| {
        let criteria = criteria.get();
        let source = source.clone();
        in_flight.update(InFlight::start);

        spawn_local(async move {
            let outcome = ReportStore::fetch(&source, &criteria).await;
            controller.update(|c| {
                c.apply_fetch(outcome);
            });
            in_flight.update(InFlight::finish);
        });
    });

    // The surface lives across runs; the controller skips the draw when
    // the render key has not moved
    Effect::new(move |prev: Option<SvgSurface>| {
        render_key.track();
        let mut surface = prev.unwrap_or_default();
        let outcome = controller
            .try_update_untracked(|c| c.render_selected(&mut surface))
            .unwrap_or(RenderOutcome::Unchanged);
        if outcome != RenderOutcome::Unchanged {
            figure.set(surface.figure().cloned());
        }
        surface
    });

    let on_select = Callback::new(move |id: i64| {
        if controller.with_untracked(|c| c.selection().is_selected(id)) {
            return;
        }
        controller.update(|c| {
            c.select(id);
        });
    });

    let on_kind_change = Callback::new(move |code: String| {
        controller.update(|c| {
            c.set_kind_filter(&code);
        });
    });

    let on_date_change = Callback::new(move |date: String| {
        controller.update(|c| {
            c.set_date_filter(&date);
        });
    });

    let on_close = move |_: leptos::ev::MouseEvent| {
        controller.update(|c| {
            c.clear_selection();
        });
    };

    let export = move |format: ExportFormat| {
        controller.with_untracked(|c| {
            c.export(format);
        });
    };

    view! {
        <div id="d100_report_dashboard--dashboard" class="report-dashboard">
            <FilterBar
                kind=Signal::derive(move || criteria.with(|c| c.kind_code().to_string()))
                date=Signal::derive(move || criteria.with(|c| c.date_value().to_string()))
                on_kind_change=on_kind_change
                on_date_change=on_date_change
            />

            <Show when=move || in_flight.with(InFlight::is_loading)>
                <div class="report-dashboard__loading">
                    <Spinner />
                </div>
            </Show>

            <div class="report-grid">
                <For
                    each=move || controller.with(|c| c.reports().to_vec())
                    key=|report| (report.id, report.title.clone(), report.created_at)
                    children=move |report| {
                        let id = report.id;
                        view! {
                            <ReportCard
                                report=report
                                selected=Signal::derive(move || selection.get().is_selected(id))
                                on_select=on_select
                            />
                        }
                    }
                />
            </div>

            <Show when=move || selection.get().selected_id().is_some()>
                <div class="report-dashboard__detail">
                    <ChartView figure=figure />
                    <div class="report-dashboard__exports">
                        {ExportFormat::all()
                            .into_iter()
                            .map(|format| {
                                let appearance = match format {
                                    ExportFormat::Json => ButtonAppearance::Primary,
                                    ExportFormat::Csv => ButtonAppearance::Secondary,
                                    ExportFormat::Pdf => ButtonAppearance::Subtle,
                                };
                                view! {
                                    <Button appearance=appearance on_click=move |_| export(format)>
                                        {format.display_name()}
                                    </Button>
                                }
                            })
                            .collect_view()}
                        <Button appearance=ButtonAppearance::Transparent on_click=on_close>
                            "Close"
                        </Button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
