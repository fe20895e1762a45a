//! Dashboard page rendering
//!
//! Endpoints:
//! - page_dashboard: Summary cards and the recent activity card
//!
//! Helper functions:
//! - render_toasts: Toast fragments for queued notifications

use crate::{login_redirect, page_response, AppState};
use axum::response::{Html, IntoResponse, Response};
use spendweb_core::{DashboardSummary, Notification, NotificationKind, View};
use spendweb_utils::{escape_html, format_amount, format_number};

/// Dashboard page - also served at `/`
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let Some(handle) = state.current_session(&headers).await else {
        return login_redirect(&headers);
    };
    let mut session = handle.write().await;
    session.set_view(View::Dashboard);

    let inner_content = render_dashboard(&session.summary());
    Html(page_response(&headers, "Dashboard", &session, &inner_content)).into_response()
}

fn summary_card(label: &str, value: &str, caption: &str, color: &str) -> String {
    format!(
        r#"<div class='bg-white p-4 rounded-xl shadow-sm border border-{color}-100'>
    <p class='text-sm text-{color}-600'>{}</p>
    <p class='text-2xl font-bold mt-1'>{}</p>
    <p class='text-sm text-gray-500 mt-2'>{}</p>
</div>"#,
        label,
        value,
        caption,
        color = color
    )
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let total_approved = format!(
        "{} {}",
        escape_html(&summary.currency),
        format_amount(summary.approved_amount)
    );

    format!(
        r#"<div class='space-y-6'>
    <div class='grid gap-4 md:grid-cols-2 lg:grid-cols-4'>
        {}
        {}
        {}
        {}
    </div>
    <div class='bg-white rounded-xl shadow-sm p-6'>
        <h3 class='text-lg font-semibold'>Recent Activity</h3>
        <p class='text-gray-500 mb-4'>Latest expense submissions from your team</p>
        <a href='/expenses' class='inline-block px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>View All Expenses</a>
    </div>
</div>"#,
        summary_card("Pending Requests", &format_number(summary.pending), "Awaiting approval", "yellow"),
        summary_card("Approved", &format_number(summary.approved), "This month", "green"),
        summary_card("Rejected", &format_number(summary.rejected), "This month", "red"),
        summary_card("Total Approved", &total_approved, "This month", "indigo"),
    )
}

/// Toasts appended to `#toasts`
pub fn render_toasts(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| {
            let (class, icon) = match n.kind {
                NotificationKind::Success => ("bg-green-50 border-green-200 text-green-800", "✅"),
                NotificationKind::Error => ("bg-red-50 border-red-200 text-red-800", "⚠️"),
            };
            format!(
                r#"<div id='toast-{}' class='flex items-start gap-2 p-3 rounded-lg border shadow-sm {}' role='status' onclick='this.remove()'>{}<span>{}</span></div>"#,
                n.id,
                class,
                icon,
                escape_html(&n.message)
            )
        })
        .collect()
}
