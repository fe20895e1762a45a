//! Helpers for driving the router in tests

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use spendweb_config::Config;
use spendweb_core::{ExpenseRecord, ExpenseStatus};
use spendweb_provider::FixtureProvider;
use std::sync::Arc;
use tower::ServiceExt;

use crate::{create_router, AppState};

/// Four records, one of each shape the views care about
pub fn fixture_records() -> Vec<ExpenseRecord> {
    let mut travel = FixtureProvider::record("EXP-1002", "Sarah Johnson", ExpenseStatus::Pending);
    travel.approval_subject = "Travel Expense Claim".to_string();
    travel.category = "Travel".to_string();
    travel.approval_comments = "Approved as per company policy".to_string();

    let mut approved = FixtureProvider::record("EXP-1003", "Emily Davis", ExpenseStatus::Approved);
    approved.amount = "1250.50".parse().unwrap();

    vec![
        FixtureProvider::record("EXP-1001", "John Smith", ExpenseStatus::Pending),
        travel,
        approved,
        FixtureProvider::record("EXP-1004", "Michael Brown", ExpenseStatus::Rejected),
    ]
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.approval.delay_ms = 60;
    config
}

pub fn test_app(records: Vec<ExpenseRecord>) -> Router {
    let provider = Arc::new(FixtureProvider::new(records));
    create_router(AppState::new(test_config(), provider))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn builder(method: &str, path: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(path);
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    builder("GET", path, cookie).body(Body::empty()).unwrap()
}

pub fn get_htmx(path: &str, cookie: Option<&str>) -> Request<Body> {
    builder("GET", path, cookie)
        .header("hx-request", "true")
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(path: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    builder("POST", path, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn post_htmx(path: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    builder("POST", path, cookie)
        .header("hx-request", "true")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// Log in and return the `name=value` cookie pair
pub async fn login(app: &Router, name: &str) -> String {
    let form = format!("name={}", urlencoding::encode(name));
    let (status, headers, _) = send(app, post_form("/login", None, &form)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// JSON body of `GET path`
pub async fn get_json(app: &Router, path: &str, cookie: &str) -> serde_json::Value {
    let (status, _, body) = send(app, get(path, Some(cookie))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    serde_json::from_str(&body).unwrap()
}
