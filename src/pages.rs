//! HTML page handlers: map a request path to a [`Page`] and render the shell.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::debug;

use crate::AppState;
use crate::db::repository::FinanceRepository;
use crate::error::AppResult;
use crate::ui::{Page, Route, render_document};

/// Every [`Route`] path is served by [`show`]; anything else falls through to
/// [`not_found`].
pub fn router() -> Router<AppState> {
    Route::ALL
        .into_iter()
        .fold(Router::new(), |router, route| router.route(route.path(), get(show)))
}

/// Resolve the request path against the route table and render its page.
async fn show(State(state): State<AppState>, uri: Uri) -> AppResult<Response> {
    let page = match Route::from_path(uri.path()) {
        Some(Route::Home) => Page::Welcome,
        Some(Route::Logo) => Page::Logo,
        Some(Route::Invoices) => {
            Page::Invoices(FinanceRepository::list_invoices(state.db.pool()).await?)
        }
        None => return Ok(not_found(uri).await.into_response()),
    };
    Ok(Html(render_document(page)).into_response())
}

/// Unmatched paths keep the shell but leave the content region empty.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    debug!(name: "page.unmatched", path = %uri.path(), "No route matched");
    (StatusCode::NOT_FOUND, Html(render_document(Page::Unmatched)))
}
