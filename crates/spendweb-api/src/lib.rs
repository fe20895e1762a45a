//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::session: Login and logout
//! - routes::dashboard: Summary cards, navigation, toasts, settings
//! - routes::expenses: Expense table, search, pagination, approval dialog

pub mod error;
pub mod routes;

#[cfg(test)]
mod testing;

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use spendweb_config::Config;
use spendweb_core::{ProviderRef, Session, SessionHandle, SessionOptions, SessionRegistry, View};
use spendweb_utils::escape_html;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, provider: ProviderRef) -> Self {
        let sessions = SessionRegistry::new(provider, SessionOptions::from(&config));
        Self {
            sessions: Arc::new(sessions),
            config,
        }
    }

    /// Session named by the request's cookie, if it is still live
    pub async fn current_session(&self, headers: &HeaderMap) -> Option<SessionHandle> {
        let id = session_cookie(headers, &self.config.session.cookie_name)?;
        self.sessions.get(&id).await
    }

    /// Like [`AppState::current_session`], failing with `NotLoggedIn`
    pub async fn require_session(&self, headers: &HeaderMap) -> ApiResult<SessionHandle> {
        let id = session_cookie(headers, &self.config.session.cookie_name);
        Ok(self.sessions.require(id.as_deref()).await?)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{
        api_settings, api_summary, htmx_notifications, htmx_toggle_mobile_nav, page_dashboard,
    };
    use routes::expenses::{
        api_expense_detail, api_expenses, htmx_approve_dialog, htmx_decision_cancel,
        htmx_decision_confirm, htmx_expenses_list, htmx_reject_dialog, page_expenses,
    };
    use routes::session::{login_submit, logout_submit, page_login};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/expenses", get(api_expenses))
        .route("/api/expenses/:id", get(api_expense_detail))
        .route("/api/summary", get(api_summary))
        .route("/api/settings", get(api_settings))
        // Session
        .route("/login", get(page_login).post(login_submit))
        .route("/logout", post(logout_submit))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .route("/expenses", get(page_expenses))
        // HTMX partial routes
        .route("/expenses/list", get(htmx_expenses_list))
        .route("/expenses/decision/cancel", post(htmx_decision_cancel))
        .route("/expenses/decision/confirm", post(htmx_decision_confirm))
        .route("/expenses/:id/approve", get(htmx_approve_dialog))
        .route("/expenses/:id/reject", get(htmx_reject_dialog))
        .route("/notifications", get(htmx_notifications))
        .route("/nav/mobile", post(htmx_toggle_mobile_nav))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Session Cookie ====================

/// Read the session id from the `Cookie` header
pub fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn set_session_cookie(name: &str, id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, id)
}

pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

/// Send the browser to the login page. HTMX requests get an `HX-Redirect`
/// so the whole page is replaced instead of the swap target.
pub fn login_redirect(headers: &HeaderMap) -> Response {
    if is_htmx_request(headers) {
        ([("HX-Redirect", "/login")], "").into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

/// Path of the page showing `view`
pub fn view_path(view: View) -> &'static str {
    match view {
        View::Dashboard => "/dashboard",
        View::Expenses => "/expenses",
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Spendweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(view: View) -> String {
    let links = [
        (View::Dashboard, "Dashboard", "📊"),
        (View::Expenses, "Team Expenses", "🧾"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-full flex flex-col'><div class='p-6 border-b'><h1 class='text-xl font-bold text-indigo-600'>Expense Manager</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (target, label, icon) in &links {
        let active_class = if *target == view { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            view_path(*target), active_class, icon, label
        ));
    }
    nav.push_str(
        r#"</ul><div class='p-4 border-t'><form method='post' action='/logout'><button type='submit' class='w-full flex items-center gap-2 px-3 py-2 rounded-lg text-red-600 hover:bg-red-50'>🚪<span>Logout</span></button></form></div></div>"#,
    );
    nav
}

/// Slide-over navigation for small screens
pub fn mobile_nav(open: bool, view: View) -> String {
    if !open {
        return "<div id='mobile-nav'></div>".to_string();
    }
    format!(
        r#"<div id='mobile-nav' class='fixed inset-0 z-40 lg:hidden'>
    <div class='absolute inset-0 bg-black bg-opacity-40' hx-post='/nav/mobile' hx-target='#mobile-nav' hx-swap='outerHTML'></div>
    <aside class='relative w-64 h-full'>{}</aside>
</div>"#,
        nav_sidebar(view)
    )
}

/// Top bar with greeting and the mobile menu button
pub fn header_bar(manager_name: &str, view: View) -> String {
    let subtitle = match view {
        View::Dashboard => "Overview of team expenses",
        View::Expenses => "Manage team expense requests",
    };
    format!(
        r#"<header class='border-b bg-white p-4 flex items-center gap-4'>
    <button class='lg:hidden px-2 py-1 rounded hover:bg-gray-100' hx-post='/nav/mobile' hx-target='#mobile-nav' hx-swap='outerHTML'>☰</button>
    <div class='flex-1'>
        <h3 class='text-lg font-semibold'>Welcome back, {}!</h3>
        <p class='text-gray-500'>{}</p>
    </div>
</header>"#,
        escape_html(manager_name),
        subtitle
    )
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, session: &Session, inner_content: &str) -> String {
    let view = session.view();
    if is_htmx_request(headers) {
        // HTMX partial - just the content area
        format!(
            "{}<main class='flex-1 overflow-auto p-4 lg:p-6'>{}</main>",
            header_bar(session.manager_name(), view),
            inner_content
        )
    } else {
        base_html(title, &format!(
            r#"<div class='flex h-screen overflow-hidden'>
    <aside class='hidden lg:flex w-64 flex-shrink-0'>{}</aside>
    {}
    <div class='flex-1 flex flex-col overflow-hidden'>
        {}
        <main class='flex-1 overflow-auto p-4 lg:p-6'>{}</main>
    </div>
</div>
<div id='modal'></div>
<div id='toasts' class='fixed top-4 right-4 z-50 space-y-2 w-80'></div>
<div id='decision-poller'></div>"#,
            nav_sidebar(view),
            mobile_nav(session.mobile_nav_open(), view),
            header_bar(session.manager_name(), view),
            inner_content
        ))
    }
}

/// Start the HTTP server and run until Ctrl+C
pub async fn start_server(config: Config, provider: ProviderRef) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, provider);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Spendweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /login (Manager sign-in)");
    log::info!("  - /dashboard (Summary)");
    log::info!("  - /expenses (Team expenses)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
