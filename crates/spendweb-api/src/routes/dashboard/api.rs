//! Dashboard API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_summary: Counts and approved total (JSON)
//! - api_settings: Loaded configuration (JSON)
//! - htmx_notifications: Drain queued toasts (HTML fragment)
//! - htmx_toggle_mobile_nav: Open/close the mobile panel (HTML fragment)

use super::page::render_toasts;
use crate::routes::expenses::page::{decision_poller, render_table};
use crate::{login_redirect, mobile_nav, ApiResult, AppState};
use axum::extract::Query;
use axum::response::{Html, IntoResponse, Response};
use spendweb_core::View;
use std::collections::HashMap;

/// Poll interval while a decision is still being submitted
const POLL_RETRY_MS: u128 = 100;

/// Get dashboard summary (JSON API)
pub async fn api_summary(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> ApiResult<Response> {
    let handle = state.require_session(&headers).await?;
    let session = handle.read().await;
    Ok(axum::Json(session.summary()).into_response())
}

/// Get loaded configuration (JSON API)
pub async fn api_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> ApiResult<Response> {
    state.require_session(&headers).await?;
    Ok(axum::Json(&state.config).into_response())
}

/// HTMX: queued toasts, appended to `#toasts`.
///
/// With `refresh` set the expenses table is swapped out-of-band as well, so
/// a landed decision shows up without reloading the page.
pub async fn htmx_notifications(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Response {
    let Some(handle) = state.current_session(&headers).await else {
        return login_redirect(&headers);
    };
    let mut session = handle.write().await;

    if session.workflow().is_submitting() {
        return Html(decision_poller(Some(POLL_RETRY_MS))).into_response();
    }

    let notifications = session.drain_notifications();
    let mut html = render_toasts(&notifications);
    html.push_str(&decision_poller(None));

    if params.contains_key("refresh") && session.view() == View::Expenses {
        let pending = session.summary().pending;
        let page = session.current_page();
        html.push_str(&format!(
            "<div id='expenses-table' hx-swap-oob='true'>{}</div>",
            render_table(&page, pending)
        ));
    }

    Html(html).into_response()
}

/// HTMX: toggle the mobile navigation panel
pub async fn htmx_toggle_mobile_nav(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let Some(handle) = state.current_session(&headers).await else {
        return login_redirect(&headers);
    };
    let mut session = handle.write().await;
    let open = session.toggle_mobile_nav();
    Html(mobile_nav(open, session.view())).into_response()
}

#[cfg(test)]
mod tests {
    use crate::testing::{fixture_records, get, get_json, login, post_htmx, send, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_summary_json() {
        let app = test_app(fixture_records());
        let cookie = login(&app, "Alex").await;
        let summary = get_json(&app, "/api/summary", &cookie).await;
        assert_eq!(summary["pending"], 2);
        assert_eq!(summary["approved"], 1);
        assert_eq!(summary["rejected"], 1);
        assert_eq!(summary["total"], 4);
        assert_eq!(summary["currency"], "USD");
    }

    #[tokio::test]
    async fn test_json_requires_session() {
        let app = test_app(fixture_records());
        for path in ["/api/summary", "/api/settings", "/api/expenses", "/api/expenses/EXP-1001"] {
            let (status, _, body) = send(&app, get(path, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", path);
            let details: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(details["code"], "NOT_LOGGED_IN");
        }
    }

    #[tokio::test]
    async fn test_settings_json() {
        let app = test_app(fixture_records());
        let cookie = login(&app, "Alex").await;
        let settings = get_json(&app, "/api/settings", &cookie).await;
        assert_eq!(settings["pagination"]["records_per_page"], 10);
        assert_eq!(settings["session"]["cookie_name"], "spendweb_session");
    }

    #[tokio::test]
    async fn test_mobile_nav_toggle() {
        let app = test_app(fixture_records());
        let cookie = login(&app, "Alex").await;

        let (_, _, open) = send(&app, post_htmx("/nav/mobile", Some(&cookie), "")).await;
        assert!(open.contains("Team Expenses"));
        let (_, _, closed) = send(&app, post_htmx("/nav/mobile", Some(&cookie), "")).await;
        assert_eq!(closed, "<div id='mobile-nav'></div>");

        send(&app, post_htmx("/nav/mobile", Some(&cookie), "")).await;
        let (_, _, page) = send(&app, get("/dashboard", Some(&cookie))).await;
        assert!(!page.contains("fixed inset-0 z-40"));
    }

    #[tokio::test]
    async fn test_notifications_empty() {
        let app = test_app(fixture_records());
        let cookie = login(&app, "Alex").await;
        let (status, _, body) = send(&app, get("/notifications", Some(&cookie))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("toast-"));
    }
}
