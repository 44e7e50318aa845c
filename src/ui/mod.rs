//! Server-rendered UI.
//!
//! - [`app`]: the shell component and [`Page`] selection
//! - [`routes`]: the path-to-route table
//! - [`pages`]: content panes
//! - [`components`]: reusable primitives

pub mod app;
pub mod components;
pub mod pages;
pub mod routes;

use leptos::prelude::*;
use leptos::reactive::owner::Owner;
use leptos::tachys::view::RenderHtml;

pub use app::{App, Page};
pub use routes::Route;

/// Render `page` inside the shell as a complete HTML document.
pub fn render_document(page: Page) -> String {
    let owner = Owner::new();
    let body = owner.with(|| view! { <App page=page/> }.to_html());
    format!("<!DOCTYPE html>{body}")
}
