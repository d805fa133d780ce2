use crate::dashboards::ReportDashboard;
use crate::layout::branding::provide_branding;
use crate::layout::Layout;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Branding is fetched once for the whole app
    provide_branding();

    view! {
        <ConfigProvider>
            <Layout>
                <ReportDashboard />
            </Layout>
        </ConfigProvider>
    }
}
