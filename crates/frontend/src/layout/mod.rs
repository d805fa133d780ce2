pub mod branding;

use leptos::prelude::*;

/// Branded page frame: header with the tenant logo and name above the
/// page content.
///
/// ```text
/// +------------------------------------------+
/// |  [logo]  Brand name                      |
/// +------------------------------------------+
/// |                 content                  |
/// +------------------------------------------+
/// ```
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let branding = branding::use_branding();

    view! {
        <div
            class=move || branding.with(|b| b.theme_class.clone())
            style="min-height: 100vh;"
        >
            <header
                class="app-header"
                style=move || branding.with(|b| format!("background-color: {};", b.primary_color))
            >
                <img
                    src=move || branding.with(|b| b.logo_url.clone())
                    alt="Logo"
                    class="app-header__logo"
                />
                <h1 class="app-header__title">
                    {move || branding.with(|b| b.brand_name.clone())}
                </h1>
            </header>
            <main class="app-main">{children()}</main>
        </div>
    }
}
