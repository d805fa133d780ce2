use leptos::prelude::*;

use crate::dashboards::d100_report_dashboard::chart::{
    SERIES_FILL, SERIES_STROKE, SERIES_STROKE_WIDTH,
};
use crate::dashboards::d100_report_dashboard::svg::{ChartFigure, MARGIN, VIEW_HEIGHT, VIEW_WIDTH};

const AXIS_STROKE: &str = "#94a3b8";
const LABEL_OFFSET: f64 = 16.0;

fn num(value: f64) -> String {
    format!("{:.2}", value)
}

fn view_box() -> String {
    format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT)
}

fn axis(baseline: f64) -> impl IntoView {
    view! {
        <line
            x1=num(MARGIN)
            y1=num(baseline)
            x2=num(VIEW_WIDTH - MARGIN)
            y2=num(baseline)
            stroke=AXIS_STROKE
            stroke-width="1"
        ></line>
    }
}

/// Paints a [`ChartFigure`] as inline SVG
#[component]
pub fn ChartView(#[prop(into)] figure: Signal<Option<ChartFigure>>) -> impl IntoView {
    move || match figure.get() {
        None => view! { <></> }.into_any(),

        Some(ChartFigure::NoData { title }) => view! {
            <div class="report-chart report-chart--empty">
                <h2 class="report-chart__title">{title}</h2>
                <p class="report-chart__empty">"No data"</p>
            </div>
        }
        .into_any(),

        Some(ChartFigure::Bar { title, baseline, bars }) => view! {
            <div class="report-chart">
                <h2 class="report-chart__title">{title}</h2>
                <svg viewBox=view_box() class="report-chart__canvas" role="img">
                    {axis(baseline)}
                    {bars
                        .into_iter()
                        .map(|bar| {
                            let label_x = bar.x + bar.width / 2.0;
                            view! {
                                <g class="report-chart__bar">
                                    <rect
                                        x=num(bar.x)
                                        y=num(bar.y)
                                        width=num(bar.width)
                                        height=num(bar.height)
                                        fill=SERIES_FILL
                                        stroke=SERIES_STROKE
                                        stroke-width=num(SERIES_STROKE_WIDTH)
                                    ></rect>
                                    <text
                                        x=num(label_x)
                                        y=num(VIEW_HEIGHT - MARGIN + LABEL_OFFSET)
                                        text-anchor="middle"
                                        font-size="11"
                                    >
                                        {bar.label}
                                    </text>
                                </g>
                            }
                        })
                        .collect_view()}
                </svg>
            </div>
        }
        .into_any(),

        Some(ChartFigure::Line { title, baseline, path, points }) => view! {
            <div class="report-chart">
                <h2 class="report-chart__title">{title}</h2>
                <svg viewBox=view_box() class="report-chart__canvas" role="img">
                    {axis(baseline)}
                    <path
                        d=path
                        fill="none"
                        stroke=SERIES_STROKE
                        stroke-width=num(SERIES_STROKE_WIDTH * 2.0)
                    ></path>
                    {points
                        .into_iter()
                        .map(|point| {
                            view! {
                                <g class="report-chart__point">
                                    <circle
                                        cx=num(point.x)
                                        cy=num(point.y)
                                        r="3"
                                        fill=SERIES_FILL
                                        stroke=SERIES_STROKE
                                    ></circle>
                                    <text
                                        x=num(point.x)
                                        y=num(VIEW_HEIGHT - MARGIN + LABEL_OFFSET)
                                        text-anchor="middle"
                                        font-size="11"
                                    >
                                        {point.label}
                                    </text>
                                </g>
                            }
                        })
                        .collect_view()}
                </svg>
            </div>
        }
        .into_any(),

        Some(ChartFigure::Pie { title, slices }) => {
            let legend = slices
                .iter()
                .map(|slice| {
                    let swatch = format!("background-color: {};", slice.fill);
                    let text = format!("{} ({:.1}%)", slice.label, slice.share * 100.0);
                    view! {
                        <li class="report-chart__legend-item">
                            <span class="report-chart__swatch" style=swatch></span>
                            {text}
                        </li>
                    }
                })
                .collect_view();
            view! {
                <div class="report-chart">
                    <h2 class="report-chart__title">{title}</h2>
                    <svg viewBox=view_box() class="report-chart__canvas" role="img">
                        {slices
                            .into_iter()
                            .map(|slice| {
                                view! {
                                    <path
                                        d=slice.path
                                        fill=slice.fill
                                        stroke="#ffffff"
                                        stroke-width=num(SERIES_STROKE_WIDTH)
                                    ></path>
                                }
                            })
                            .collect_view()}
                    </svg>
                    <ul class="report-chart__legend">{legend}</ul>
                </div>
            }
            .into_any()
        }
    }
}
