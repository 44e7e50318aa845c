//! Card container with header and content sections.

use leptos::prelude::*;

/// Bordered panel used for each page's main content.
#[component]
pub fn Card(children: Children) -> impl IntoView {
    view! {
        <section class="rounded-xl border border-panelBorder bg-panel shadow-sm">
            {children()}
        </section>
    }
}

#[component]
pub fn CardHeader(children: Children) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between gap-2 p-6">
            {children()}
        </div>
    }
}

#[component]
pub fn CardContent(
    #[prop(default = "")]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!("p-6 pt-0 {class}");

    view! {
        <div class=classes>
            {children()}
        </div>
    }
}
