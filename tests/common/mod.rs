//! Shared test utilities for integration tests.
//!
//! This module provides a `TestClient` that drives the application router
//! in-process with a fixed session date and a small product list, simulating
//! a browser working against one dashboard.

#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use salesboard::config::Config;
use salesboard::dashboard::Dashboard;
use salesboard::date_utils::SessionDate;
use salesboard::handlers;
use salesboard::models::Product;
use salesboard::server;
use salesboard::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// The session date every test dashboard is opened on.
pub fn session_date() -> SessionDate {
    SessionDate::from_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
}

/// Two products: A has sold 6 units, B has sold none.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "A".into(),
            buy_price: dec!(1),
            sale_price: dec!(2),
            initial_stock: 10,
            remaining_stock: 4,
        },
        Product {
            id: 2,
            name: "B".into(),
            buy_price: dec!(5),
            sale_price: dec!(8),
            initial_stock: 3,
            remaining_stock: 3,
        },
    ]
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 7070,
        static_path: PathBuf::from("static"),
        ..Config::default()
    }
}

/// Read a decimal out of a JSON value, whether serialized as string or number.
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("not a decimal: {other}"),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// A test client that simulates a browser session, allowing sequential requests
/// against one dashboard.
pub struct TestClient {
    state: AppState,
    app: Router,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_products(sample_products())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let dashboard = Dashboard::new(products, session_date());
        let (state, app) = server::build_app_with(test_config(), dashboard);
        Self { state, app }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn xsrf_token(&self) -> String {
        self.state.xsrf_token.value().to_string()
    }

    /// Router without middleware, for direct handler testing.
    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// The full middleware stack, as served in production.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    pub async fn send(&self, router: Router, request: Request<Body>) -> TestResponse {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.send(self.router(), request).await;
        (response.status, response.text())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
        (status, parsed)
    }

    fn form_body(form_data: &[(&str, &str)]) -> String {
        form_data
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn form_request(uri: &str, form_data: &[(&str, &str)], htmx: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        builder.body(Body::from(Self::form_body(form_data))).unwrap()
    }

    /// Plain form POST (no HTMX header) and return the full response.
    pub async fn post_form(&self, uri: &str, form_data: &[(&str, &str)]) -> TestResponse {
        self.send(self.router(), Self::form_request(uri, form_data, false))
            .await
    }

    /// HTMX form POST and return status and body.
    pub async fn post_htmx(&self, uri: &str, form_data: &[(&str, &str)]) -> (StatusCode, String) {
        let response = self
            .send(self.router(), Self::form_request(uri, form_data, true))
            .await;
        (response.status, response.text())
    }

    // =========================================================================
    // Helpers for dashboard operations
    // =========================================================================

    pub async fn set_remaining(&self, id: i64, value: &str) -> (StatusCode, String) {
        self.post_htmx(&format!("/products/{id}/remaining"), &[("value", value)])
            .await
    }

    pub async fn set_field(&self, id: i64, field: &str, value: &str) -> (StatusCode, String) {
        self.post_htmx(
            &format!("/products/{id}/field"),
            &[("field", field), ("value", value)],
        )
        .await
    }

    pub async fn toggle_edit_mode(&self) -> (StatusCode, String) {
        self.post_htmx("/edit-mode", &[]).await
    }

    /// Current product list as JSON objects.
    pub async fn products(&self) -> Vec<Value> {
        let (status, json) = self.get_json("/api/products").await;
        assert_eq!(status, StatusCode::OK);
        json.as_array().cloned().unwrap_or_default()
    }

    pub async fn product(&self, id: i64) -> Value {
        self.products()
            .await
            .into_iter()
            .find(|p| p["id"] == id)
            .unwrap_or_else(|| panic!("product {id} missing"))
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
