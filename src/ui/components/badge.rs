//! Badge component for counts and statuses.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Counts.
    #[default]
    Neutral,
    /// Settled invoices.
    Success,
    /// Invoices with a balance still due.
    Warning,
}

impl BadgeVariant {
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Neutral => "bg-panel text-textPrimary border border-panelBorder",
            Self::Success => "bg-success text-white",
            Self::Warning => "bg-warning text-black",
        }
    }
}

/// Small rounded label.
///
/// ```rust,ignore
/// view! { <Badge variant=BadgeVariant::Warning>"Due"</Badge> }
/// ```
#[component]
pub fn Badge(
    #[prop(default = BadgeVariant::Neutral)]
    variant: BadgeVariant,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-semibold {}",
        variant.classes()
    );

    view! {
        <span class=classes>
            {children()}
        </span>
    }
}
