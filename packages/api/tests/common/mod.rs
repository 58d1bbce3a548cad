// ABOUTME: Shared helpers for the API integration tests
// ABOUTME: Builds the router over an in-memory database and a recording mailer

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use skz_api::{create_router, ApiSettings, AppState};
use skz_catalog::{CompanyProfile, ServiceCatalog};
use skz_notify::{Delivery, Mailer, NotifyResult, OutgoingEmail};
use skz_storage::ProposalStorage;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "painel-skyz-2026";

/// Keeps every email instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits for spawned email tasks to land
    pub async fn wait_for(&self, count: usize) -> Vec<OutgoingEmail> {
        for _ in 0..100 {
            if self.sent().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> NotifyResult<Delivery> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(Delivery::Sent {
            id: Some("re_test".to_string()),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub storage: ProposalStorage,
    pub mailer: Arc<RecordingMailer>,
}

pub async fn test_app() -> TestApp {
    test_app_with(ApiSettings {
        base_url: "https://propostas.skyz.test".to_string(),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        notification_email: None,
        cookie_secure: false,
    })
    .await
}

pub async fn test_app_with(settings: ApiSettings) -> TestApp {
    let pool = skz_storage::connect_in_memory().await.unwrap();
    let storage = ProposalStorage::new(pool);
    let mailer = Arc::new(RecordingMailer::default());

    let state = AppState::new(
        Arc::new(ServiceCatalog::standard()),
        Arc::new(CompanyProfile::skyz()),
        storage.clone(),
        mailer.clone(),
        settings,
    );

    TestApp {
        router: create_router(state),
        storage,
        mailer,
    }
}

impl TestApp {
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response {
        self.request(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: Value) -> Response {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Posts an HTML form (already urlencoded), the way the viewer page does
    pub async fn send_form(&self, uri: &str, body: &str) -> Response {
        self.request(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Creates a proposal through the API and returns its id
    pub async fn create_proposal(&self, body: Value) -> String {
        let response = self
            .send_json(Method::POST, "/api/proposals/create", body)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["data"]["proposalId"].as_str().unwrap().to_string()
    }

    /// Logs in and returns the `name=value` pair to send back as a cookie
    pub async fn admin_cookie(&self) -> String {
        let response = self
            .send_json(
                Method::POST,
                "/api/admin/auth",
                json!({ "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The landing page request used across the lifecycle tests
pub fn landing_page_request() -> Value {
    json!({
        "category": "web",
        "service": "landing_page",
        "serviceOption": "landing_pro",
        "timeline": "normal",
        "budget": "1000_2000",
        "clientName": "Marina Costa",
        "clientEmail": "marina@lojamarina.com.br",
        "clientPhone": "(11) 98765-4321",
        "clientCompany": "Loja Marina",
        "clientSegment": "ecommerce",
        "challenges": ["sales", "conversion"],
        "hasBranding": "parcial",
        "deliveryMethod": ["google_drive"],
        "wantsMeeting": "sim",
        "observations": "Quero lançar antes da Black Friday",
        "sendProposalByEmail": true
    })
}
