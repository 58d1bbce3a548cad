// ABOUTME: Integration tests for admin login, session checks, and the proposal listing
// ABOUTME: Exercises the signed cookie round-trip through the real router

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_json, landing_page_request, test_app, test_app_with, ADMIN_PASSWORD};
use pretty_assertions::assert_eq;
use serde_json::json;
use skz_api::ApiSettings;

#[tokio::test]
async fn login_sets_http_only_cookie() {
    let app = test_app().await;
    let response = app
        .send_json(
            Method::POST,
            "/api/admin/auth",
            json!({ "password": ADMIN_PASSWORD }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("admin_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(!cookie.contains("Secure"));

    let body = body_json(response).await;
    assert_eq!(body["data"]["authenticated"], true);
    assert!(body["data"]["expiresAt"].is_string());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = test_app().await;
    let response = app
        .send_json(
            Method::POST,
            "/api/admin/auth",
            json!({ "password": "chute" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Senha incorreta");
}

#[tokio::test]
async fn login_without_configured_password_is_server_error() {
    let app = test_app_with(ApiSettings::default()).await;
    let response = app
        .send_json(
            Method::POST,
            "/api/admin/auth",
            json!({ "password": "qualquer" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn session_check_reflects_cookie() {
    let app = test_app().await;

    let response = app.get("/api/admin/auth").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["authenticated"], false);

    let cookie = app.admin_cookie().await;
    let response = app.get_with_cookie("/api/admin/auth", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["authenticated"], true);

    let response = app
        .get_with_cookie("/api/admin/auth", "admin_token=forjado.deadbeef")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = test_app().await;
    let response = app
        .request(
            axum::http::Request::builder()
                .method(Method::DELETE)
                .uri("/api/admin/auth")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("admin_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn listing_requires_admin_session() {
    let app = test_app().await;
    let response = app.get("/api/admin/proposals").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_filters_paginates_and_counts() {
    let app = test_app().await;
    let viewed = app.create_proposal(landing_page_request()).await;

    let mut other = landing_page_request();
    other["clientName"] = json!("Rafael Souza");
    other["clientEmail"] = json!("rafael@padaria.test");
    other["clientCompany"] = json!("Padaria Souza");
    app.create_proposal(other).await;

    app.get(&format!("/api/proposals/{}", viewed)).await;
    let cookie = app.admin_cookie().await;

    let response = app
        .get_with_cookie("/api/admin/proposals?limit=1&sortBy=clientName&sortOrder=asc", &cookie)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["proposals"].as_array().unwrap().len(), 1);
    assert_eq!(data["proposals"][0]["clientName"], "Marina Costa");
    assert_eq!(data["proposals"][0]["recommendedPrice"], 69700);
    assert_eq!(data["pagination"]["total"], 2);
    assert_eq!(data["pagination"]["totalPages"], 2);
    assert_eq!(data["pagination"]["hasNextPage"], true);
    assert_eq!(data["stats"]["total"], 2);
    assert_eq!(data["stats"]["sent"], 1);
    assert_eq!(data["stats"]["viewed"], 1);

    let response = app
        .get_with_cookie("/api/admin/proposals?status=SENT&search=padaria", &cookie)
        .await;
    let body = body_json(response).await;
    let rows = body["data"]["proposals"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["clientName"], "Rafael Souza");

    let response = app
        .get_with_cookie("/api/admin/proposals?search=100%25", &cookie)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn listing_rejects_unknown_sort_column() {
    let app = test_app().await;
    let cookie = app.admin_cookie().await;
    let response = app
        .get_with_cookie("/api/admin/proposals?sortBy=client_email", &cookie)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn manual_send_requires_admin_and_delivers() {
    let app = test_app().await;
    let mut request = landing_page_request();
    request["sendProposalByEmail"] = json!(false);
    let id = app.create_proposal(request).await;

    let response = app
        .send_json(
            Method::POST,
            "/api/proposals/send-email",
            json!({ "proposalId": id }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.mailer.sent().is_empty());

    let cookie = app.admin_cookie().await;
    let response = app
        .request(
            axum::http::Request::builder()
                .method(Method::POST)
                .uri("/api/proposals/send-email")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(axum::body::Body::from(json!({ "proposalId": id }).to_string()))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["devMode"], false);

    assert_eq!(app.mailer.sent().len(), 1);
    assert!(app.storage.get(&id).await.unwrap().email_sent_at.is_some());
}

#[tokio::test]
async fn catalog_endpoints_serve_reference_data() {
    let app = test_app().await;

    let response = app.get("/api/catalog/services?category=web").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["landing_page", "site_institucional", "sistema_saas"]);

    let response = app.get("/api/catalog/services/nao_existe").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/api/catalog/services?category=audio").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/api/catalog/intake").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["steps"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["timelines"][0]["value"], "urgente");
    assert!(body["data"]["suggestedBudgets"].as_array().unwrap().len() > 5);
}
