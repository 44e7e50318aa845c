#![allow(dead_code)]

use axum_test::TestServer;
use fms::AppState;
use fms::config::AppConfig;
use fms::server::build_router;
use serde_json::json;
use tempfile::TempDir;

/// A router over a throwaway database and uploads directory.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let (mut config, _) = AppConfig::load_from_args(["fms"]).expect("Failed to load config");
    config.storage.database_url = format!("sqlite://{}", dir.path().join("fms.db").display());
    config.storage.uploads_dir = dir.path().join("uploads").display().to_string();
    config.security.jwt_secret = "test-secret".to_string();
    config.limits.max_upload_bytes = 64 * 1024;

    let state = AppState::new(config).await.expect("Failed to build state");
    let server = TestServer::new(build_router(state.clone())).expect("Failed to start server");

    TestApp { server, state, dir }
}

impl TestApp {
    /// Register `email` with `role` and return a bearer token for it.
    pub async fn login_as(&self, email: &str, role: &str) -> String {
        self.server
            .post("/signup")
            .json(&json!({ "email": email, "password": "pa55word", "role": role }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = self
            .server
            .post("/token")
            .form(&[("username", email), ("password", "pa55word")])
            .await;
        response.assert_status_ok();

        response.json::<serde_json::Value>()["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }
}
