//! Login page rendering
//!
//! Endpoints:
//! - page_login: Sign-in form, or a redirect when already signed in

use crate::{base_html, view_path, AppState};
use axum::response::{Html, IntoResponse, Redirect, Response};
use spendweb_utils::escape_html;

/// Login page
pub async fn page_login(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Some(handle) = state.current_session(&headers).await {
        let session = handle.read().await;
        return Redirect::to(view_path(session.view())).into_response();
    }
    Html(render_login(None, "")).into_response()
}

/// Sign-in form with an optional validation message
pub fn render_login(error: Option<&str>, name: &str) -> String {
    let error_html = error
        .map(|message| {
            format!(
                "<p class='text-sm text-red-600' role='alert'>{}</p>",
                escape_html(message)
            )
        })
        .unwrap_or_default();

    base_html(
        "Sign In",
        &format!(
            r#"<div class='min-h-screen flex items-center justify-center p-4'>
    <div class='bg-white rounded-xl shadow-sm border w-full max-w-md p-8'>
        <h1 class='text-2xl font-bold text-indigo-600 mb-1'>Expense Manager</h1>
        <p class='text-gray-500 mb-6'>Sign in to review your team's expenses</p>
        <form method='post' action='/login' class='space-y-4'>
            <div class='space-y-2'>
                <label for='name' class='block text-sm font-medium'>Name</label>
                <input id='name' name='name' type='text' value='{}' placeholder='Enter your name' autofocus
                    class='w-full px-4 py-2 border rounded-lg'>
                {}
            </div>
            <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Sign In</button>
        </form>
    </div>
</div>"#,
            escape_html(name),
            error_html
        ),
    )
}
