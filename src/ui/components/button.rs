//! Button component.

use leptos::prelude::*;

/// Primary action button with a configurable `type` so it can submit forms.
///
/// ```rust,ignore
/// view! { <Button button_type="submit">"Upload"</Button> }
/// ```
#[component]
pub fn Button(
    /// `button`, `submit` or `reset`.
    #[prop(default = "button")]
    button_type: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type=button_type
            class="inline-flex items-center justify-center gap-2 rounded-lg h-10 px-4 text-sm font-medium transition-colors bg-primary text-white hover:bg-primaryMuted"
        >
            {children()}
        </button>
    }
}
