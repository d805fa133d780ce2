use contracts::enums::ChartKind;
use leptos::prelude::*;

/// Kind select plus exact-date input.
///
/// Emits raw input values; `""` means "no filter" for both.
#[component]
pub fn FilterBar(
    /// Current kind code, `""` for all kinds
    #[prop(into)]
    kind: Signal<String>,
    /// Current date in yyyy-mm-dd format, `""` for any date
    #[prop(into)]
    date: Signal<String>,
    on_kind_change: Callback<String>,
    on_date_change: Callback<String>,
) -> impl IntoView {
    let options: Vec<(String, String)> = std::iter::once((String::new(), "All types".to_string()))
        .chain(
            ChartKind::all()
                .into_iter()
                .map(|k| (k.code().to_string(), k.display_name().to_string())),
        )
        .collect();

    view! {
        <div class="filter-bar">
            <select
                class="filter-bar__select"
                on:change=move |ev| on_kind_change.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(value, label)| {
                        let option_value = value.clone();
                        let is_selected = move || kind.get() == option_value;
                        view! {
                            <option value=value selected=is_selected>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <input
                type="date"
                class="filter-bar__date"
                prop:value=date
                on:input=move |ev| on_date_change.run(event_target_value(&ev))
            />
        </div>
    }
}
