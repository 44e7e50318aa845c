//! JSON and file endpoints backing the shell's pages.

pub mod auth;
pub mod exports;
pub mod health;
pub mod upload;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/signup", post(auth::signup))
        .route("/token", post(auth::token))
        .route("/upload/logo", post(upload::upload_logo))
        .merge(exports::router())
}
