//! Route table for the application shell.

/// A page the shell can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Logo,
    Invoices,
}

impl Route {
    /// Every route, in navigation order.
    pub const ALL: [Route; 3] = [Route::Home, Route::Logo, Route::Invoices];

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Logo => "/logo",
            Self::Invoices => "/invoices",
        }
    }

    /// Link text in the navigation bar; the home route has no link.
    pub fn nav_label(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::Logo => Some("Upload Logo"),
            Self::Invoices => Some("Invoices"),
        }
    }

    /// Exact-match lookup. Trailing slashes and sub-paths do not match.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Routes that appear in the navigation bar.
    pub fn nav() -> impl Iterator<Item = (Route, &'static str)> {
        Self::ALL
            .into_iter()
            .filter_map(|route| route.nav_label().map(|label| (route, label)))
    }
}
