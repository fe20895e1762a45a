//! Session form handlers
//!
//! Endpoints:
//! - login_submit: Create a session (ending the browser's previous one), set
//!   the cookie, go to the default view
//! - logout_submit: Destroy the session and clear the cookie

use super::page::render_login;
use crate::{clear_session_cookie, session_cookie, set_session_cookie, view_path, ApiError, AppState};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use spendweb_core::CoreError;
use std::collections::HashMap;

/// POST /login
pub async fn login_submit(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    form: axum::Form<HashMap<String, String>>,
) -> Response {
    let name = form.get("name").map(String::as_str).unwrap_or("");

    match state.sessions.login(name).await {
        Ok(handle) => {
            if let Some(previous) = session_cookie(&headers, &state.config.session.cookie_name) {
                state.sessions.logout(&previous).await;
            }
            let session = handle.read().await;
            let cookie = set_session_cookie(&state.config.session.cookie_name, session.id());
            (
                [(header::SET_COOKIE, cookie)],
                Redirect::to(view_path(session.view())),
            )
                .into_response()
        }
        Err(CoreError::ValidationError { message }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_login(Some(&message), name)),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /logout
pub async fn logout_submit(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let cookie_name = &state.config.session.cookie_name;
    if let Some(id) = session_cookie(&headers, cookie_name) {
        state.sessions.logout(&id).await;
    }
    (
        [(header::SET_COOKIE, clear_session_cookie(cookie_name))],
        Redirect::to("/login"),
    )
        .into_response()
}
