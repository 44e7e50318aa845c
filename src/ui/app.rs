//! Application shell: header, navigation and the routed content pane.

use leptos::prelude::*;

use crate::db::models::Invoice;
use crate::ui::pages::{InvoicesPage, LogoPage, WelcomePage};
use crate::ui::routes::Route;

/// Content selected for the current request path.
#[derive(Debug, Clone)]
pub enum Page {
    Welcome,
    Logo,
    Invoices(Vec<Invoice>),
    /// No route matched; the shell renders with an empty content region.
    Unmatched,
}

impl Page {
    /// The route this page is mounted at, if any.
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Welcome => Some(Route::Home),
            Self::Logo => Some(Route::Logo),
            Self::Invoices(_) => Some(Route::Invoices),
            Self::Unmatched => None,
        }
    }
}

/// Full HTML document for one page.
///
/// The heading and navigation are identical on every route; only `<main>` changes.
#[component]
pub fn App(page: Page) -> impl IntoView {
    let active = page.route();

    let content = match page {
        Page::Welcome => view! { <WelcomePage/> }.into_any(),
        Page::Logo => view! { <LogoPage/> }.into_any(),
        Page::Invoices(invoices) => view! { <InvoicesPage invoices=invoices/> }.into_any(),
        Page::Unmatched => ().into_any(),
    };

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="FMS - finance management"/>
                <title>"FMS"</title>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>

            <body class="min-h-screen bg-background text-textPrimary antialiased">
                <div id="app-shell" class="container mx-auto max-w-5xl" style="padding: 20px">
                    <header class="space-y-2">
                        <h1 class="text-3xl font-bold">"FMS"</h1>
                        <NavBar active=active/>
                    </header>
                    <main id="app" class="py-6">
                        {content}
                    </main>
                </div>
            </body>
        </html>
    }
}

/// Navigation links separated by ` | `; the active one is marked `aria-current="page"`.
#[component]
fn NavBar(active: Option<Route>) -> impl IntoView {
    let links = Route::nav()
        .enumerate()
        .map(|(index, (route, label))| {
            let current = (active == Some(route)).then_some("page");
            view! {
                {(index > 0).then_some(" | ")}
                <a
                    href=route.path()
                    aria-current=current
                    class="text-sm text-textMuted hover:text-textPrimary transition-colors"
                >
                    {label}
                </a>
            }
        })
        .collect_view();

    view! { <nav id="main-nav">{links}</nav> }
}
