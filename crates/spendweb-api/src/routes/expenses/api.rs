//! Expenses API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_expenses: Filtered, paginated expenses (JSON)
//! - api_expense_detail: Single expense (JSON)
//! - htmx_expenses_list: Table fragment for search and page changes
//! - htmx_approve_dialog / htmx_reject_dialog: Confirmation dialog
//! - htmx_decision_cancel: Close the dialog
//! - htmx_decision_confirm: Close the dialog and schedule the decision

use super::page::{decision_poller, render_dialog, render_inline_error, render_table};
use crate::{login_redirect, ApiResult, AppState};
use axum::extract::{Path, Query};
use axum::response::{Html, IntoResponse, Response};
use spendweb_core::{query, schedule_decision, Decision};
use std::collections::HashMap;

/// Extra wait after the submission delay before fetching toasts
const POLL_MARGIN_MS: u128 = 50;

fn page_param(params: &HashMap<String, String>) -> Option<usize> {
    params.get("page").and_then(|s| s.trim().parse().ok())
}

/// Get expenses with search and pagination (JSON API). Does not touch the
/// table state of the HTML view.
pub async fn api_expenses(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    params: Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let handle = state.require_session(&headers).await?;
    let session = handle.read().await;
    let q = params.get("q").map(String::as_str).unwrap_or("");
    let page = query::paginate(
        session.store().records(),
        q,
        page_param(&params).unwrap_or(1),
        session.options().page_size,
    );
    Ok(axum::Json(page).into_response())
}

/// Get single expense detail (JSON API)
pub async fn api_expense_detail(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    path: Path<String>,
) -> ApiResult<Response> {
    let handle = state.require_session(&headers).await?;
    let session = handle.read().await;
    let record = session.store().require(&path.0)?;
    Ok(axum::Json(record).into_response())
}

/// HTMX: expenses table - Partial page update.
/// A `q` different from the current search text resets to page 1.
pub async fn htmx_expenses_list(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Response {
    let Some(handle) = state.current_session(&headers).await else {
        return login_redirect(&headers);
    };
    let mut session = handle.write().await;
    let pending = session.summary().pending;
    let page = session.view_table(params.get("q").map(String::as_str), page_param(&params));
    Html(render_table(&page, pending)).into_response()
}

async fn open_dialog(state: &AppState, headers: &axum::http::HeaderMap, id: &str, decision: Decision) -> Response {
    let Some(handle) = state.current_session(headers).await else {
        return login_redirect(headers);
    };
    let mut session = handle.write().await;
    let html = match session.begin_decision(id, decision) {
        Ok(record) => render_dialog(record, decision),
        Err(e) => {
            log::debug!("Cannot open {} dialog for {}: {}", decision, id, e);
            render_inline_error(&e.to_string())
        }
    };
    Html(html).into_response()
}

/// HTMX: approve confirmation dialog
pub async fn htmx_approve_dialog(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    path: Path<String>,
) -> Response {
    open_dialog(&state, &headers, &path.0, Decision::Approve).await
}

/// HTMX: reject confirmation dialog
pub async fn htmx_reject_dialog(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    path: Path<String>,
) -> Response {
    open_dialog(&state, &headers, &path.0, Decision::Reject).await
}

/// HTMX: cancel - closes the dialog, nothing changes
pub async fn htmx_decision_cancel(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let Some(handle) = state.current_session(&headers).await else {
        return login_redirect(&headers);
    };
    handle.write().await.cancel_decision();
    Html(String::new()).into_response()
}

/// HTMX: confirm - closes the dialog right away and applies the decision
/// once the submission delay has passed
pub async fn htmx_decision_confirm(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    form: axum::Form<HashMap<String, String>>,
) -> Response {
    let Some(handle) = state.current_session(&headers).await else {
        return login_redirect(&headers);
    };

    let (pending, token, delay) = {
        let mut session = handle.write().await;
        match session.confirm_decision(form.get("comment").map(String::as_str)) {
            Ok(pending) => (pending, session.cancellation_token(), session.options().approval_delay),
            Err(e) => return Html(render_inline_error(&e.to_string())).into_response(),
        }
    };

    log::info!(
        "Scheduled {} of {} in {}ms",
        pending.decision,
        pending.record_id,
        delay.as_millis()
    );
    schedule_decision(handle, pending, delay, token);

    Html(decision_poller(Some(delay.as_millis() + POLL_MARGIN_MS))).into_response()
}
