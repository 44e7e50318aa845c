//! Reusable UI primitives, rendered via Leptos SSR.
//!
//! - [`Button`]: form and action buttons
//! - [`Card`], [`CardHeader`], [`CardContent`]: panel container
//! - [`Badge`]: small status label
//! - [`icons`]: inline SVG icons

mod badge;
mod button;
mod card;
mod icons;

pub use badge::{Badge, BadgeVariant};
pub use button::Button;
pub use card::{Card, CardContent, CardHeader};
pub use icons::*;
