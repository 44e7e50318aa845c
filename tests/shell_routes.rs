mod common;

use axum::http::StatusCode;
use common::spawn_app;

const NAV_LINKS: [&str; 2] = [r#"href="/logo""#, r#"href="/invoices""#];

fn assert_shell(html: &str) {
    assert!(html.starts_with("<!DOCTYPE html>"), "missing doctype");
    assert!(html.contains(">FMS</h1>"), "missing FMS heading");
    assert!(html.contains("Upload Logo"), "missing Upload Logo link");
    assert!(html.contains(">Invoices</a>"), "missing Invoices link");
    for link in NAV_LINKS {
        assert!(html.contains(link), "missing {link}");
    }
}

#[tokio::test]
async fn home_shows_welcome() {
    let app = spawn_app().await;

    let response = app.server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert_shell(&html);
    assert!(html.contains("Welcome"));
    assert!(!html.contains("aria-current"));
}

#[tokio::test]
async fn logo_route_shows_upload_form() {
    let app = spawn_app().await;

    let response = app.server.get("/logo").await;
    response.assert_status_ok();

    let html = response.text();
    assert_shell(&html);
    assert!(html.contains(r#"id="logo-upload""#));
    assert!(html.contains(r#"action="/upload/logo""#));
    assert!(html.contains(r#"enctype="multipart/form-data""#));
    assert!(!html.contains("Welcome"));
}

#[tokio::test]
async fn invoices_route_lists_invoices() {
    let app = spawn_app().await;

    let empty = app.server.get("/invoices").await;
    empty.assert_status_ok();
    assert_shell(&empty.text());
    assert!(empty.text().contains("No invoices yet."));

    sqlx::query(
        "INSERT INTO invoices (invoice_id, customer_id, date, total, balance_due) VALUES (17, 3, '2024-05-01', 250.0, 100.0)",
    )
    .execute(app.state.db.pool())
    .await
    .unwrap();

    let html = app.server.get("/invoices").await.text();
    assert_shell(&html);
    assert!(html.contains("#17"));
    assert!(html.contains("250.00"));
    assert!(html.contains("/export/invoice/17?format=json"));
}

#[tokio::test]
async fn following_nav_links_activates_their_route() {
    let app = spawn_app().await;

    let home = app.server.get("/").await.text();
    for (href, label) in [("/logo", "Upload Logo"), ("/invoices", "Invoices")] {
        assert!(home.contains(&format!(r#"href="{href}""#)));

        let page = app.server.get(href).await;
        page.assert_status_ok();
        let html = page.text();

        // Exactly one link is current, and it is the one just followed.
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
        let marker = html.find(r#"aria-current="page""#).unwrap();
        let anchor_start = html[..marker].rfind("<a").unwrap();
        let anchor_end = marker + html[marker..].find("</a>").unwrap();
        let anchor = &html[anchor_start..anchor_end];
        assert!(anchor.contains(&format!(r#"href="{href}""#)), "{anchor}");
        assert!(anchor.contains(label), "{anchor}");
    }
}

#[tokio::test]
async fn unmatched_path_keeps_shell_with_empty_content() {
    let app = spawn_app().await;

    let response = app.server.get("/nowhere").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let html = response.text();
    assert_shell(&html);
    assert!(!html.contains("Welcome"));
    assert!(!html.contains("logo-upload"));
    assert!(!html.contains("aria-current"));
}

#[tokio::test]
async fn pages_are_served_as_html() {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    let app = spawn_app().await;
    let router = fms::server::build_router(app.state.clone());

    let response = router
        .oneshot(Request::get("/invoices").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}
