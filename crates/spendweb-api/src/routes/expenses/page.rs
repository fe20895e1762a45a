//! Expenses page rendering
//!
//! Endpoints:
//! - page_expenses: Manager's view with search box and the table
//!
//! Helper functions:
//! - render_table: Count line, table rows and pagination
//! - render_dialog: Approve/reject confirmation dialog
//! - render_inline_error: Error shown in place of the dialog
//! - decision_poller: Out-of-band element that fetches toasts later

use crate::{login_redirect, page_response, AppState};
use axum::response::{Html, IntoResponse, Response};
use spendweb_core::{Decision, ExpenseRecord, ExpenseStatus, Page, View};
use spendweb_utils::{escape_html, format_amount, format_number};

/// Expenses page - Table with search and pagination controls
pub async fn page_expenses(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let Some(handle) = state.current_session(&headers).await else {
        return login_redirect(&headers);
    };
    let mut session = handle.write().await;
    session.set_view(View::Expenses);

    let pending = session.summary().pending;
    let page = session.current_page();
    let inner_content = format!(
        r#"<div class='space-y-4'>
    <div>
        <h2 class='text-2xl font-bold'>Manager's View</h2>
        <p class='text-gray-500'>Review and approve expense requests from your team members</p>
    </div>
    <div class='bg-white rounded-xl shadow-sm p-6 space-y-4'>
        <h3 class='text-lg font-semibold text-center'>Approvals to review</h3>
        <input type='search' name='q' value='{}' placeholder='Search expenses...'
            hx-get='/expenses/list' hx-target='#expenses-table' hx-trigger='input changed, search'
            class='px-4 py-2 border rounded-lg w-full max-w-sm'>
        <div id='expenses-table'>{}</div>
    </div>
</div>"#,
        escape_html(&page.query),
        render_table(&page, pending)
    );

    Html(page_response(&headers, "Team Expenses", &session, &inner_content)).into_response()
}

fn status_badge(status: ExpenseStatus) -> String {
    let color = match status {
        ExpenseStatus::Pending => "bg-yellow-500",
        ExpenseStatus::Approved => "bg-green-600",
        ExpenseStatus::Rejected => "bg-red-600",
    };
    format!(
        "<span class='px-2 py-1 rounded-full text-xs text-white {}'>{}</span>",
        color,
        status.label()
    )
}

/// `CURRENCY 1,234.50`
pub fn display_amount(record: &ExpenseRecord) -> String {
    format!("{} {}", escape_html(&record.currency), format_amount(record.amount))
}

fn render_row(record: &ExpenseRecord) -> String {
    let mut tooltip = format!(
        "Description: {}\nDate: {}",
        record.description,
        record.display_date()
    );
    if record.has_comments() {
        tooltip.push_str(&format!("\nApproval Comments: {}", record.approval_comments));
    }

    let id = urlencoding::encode(&record.id);
    let actions = if record.is_pending() {
        format!(
            r#"<div class='flex justify-end gap-2'>
                <button hx-get='/expenses/{id}/approve' hx-target='#modal' class='px-3 py-1 text-sm bg-green-600 text-white rounded-lg hover:bg-green-700'>Approve</button>
                <button hx-get='/expenses/{id}/reject' hx-target='#modal' class='px-3 py-1 text-sm bg-red-600 text-white rounded-lg hover:bg-red-700'>Reject</button>
            </div>"#,
            id = id
        )
    } else {
        "<span class='text-gray-400'>-</span>".to_string()
    };

    format!(
        r#"<tr class='border-t' data-id='{}'>
        <td class='px-4 py-3 max-w-xs'>
            <div class='flex items-center gap-2'>
                <div><div>{}</div><div class='text-sm text-gray-500'>{}</div></div>
                <span class='cursor-help text-gray-400' title='{}'>ⓘ</span>
            </div>
        </td>
        <td class='px-4 py-3'>{}</td>
        <td class='px-4 py-3'>{}</td>
        <td class='px-4 py-3 whitespace-nowrap'>{}</td>
        <td class='px-4 py-3'>{}</td>
        <td class='px-4 py-3 text-right'>{}</td>
    </tr>"#,
        escape_html(&record.id),
        escape_html(&record.approval_subject),
        escape_html(&record.id),
        escape_html(&tooltip),
        escape_html(&record.employee_name),
        escape_html(&record.category),
        display_amount(record),
        status_badge(record.status),
        actions
    )
}

fn render_pagination(page: &Page<'_>) -> String {
    if !page.shows_pagination() {
        return String::new();
    }

    let query = urlencoding::encode(&page.query);
    let link = |target: usize, label: &str, enabled: bool, active: bool| {
        if !enabled {
            return format!(
                "<span class='px-3 py-1 rounded-lg text-gray-400 opacity-50 pointer-events-none'>{}</span>",
                label
            );
        }
        let class = if active { "bg-indigo-600 text-white" } else { "hover:bg-gray-100" };
        format!(
            "<button hx-get='/expenses/list?q={}&page={}' hx-target='#expenses-table' class='px-3 py-1 rounded-lg {}'>{}</button>",
            query, target, class, label
        )
    };

    let mut html = String::from("<nav class='flex justify-center gap-1 mt-4' aria-label='Pagination'>");
    html.push_str(&link(page.page.saturating_sub(1), "Previous", page.has_previous, false));
    for n in page.page_numbers() {
        html.push_str(&link(n, &n.to_string(), true, n == page.page));
    }
    html.push_str(&link(page.page + 1, "Next", page.has_next, false));
    html.push_str("</nav>");
    html
}

/// Table fragment swapped into `#expenses-table`
pub fn render_table(page: &Page<'_>, pending: usize) -> String {
    let pending_html = if pending > 0 {
        format!("<span class='ml-2 text-yellow-600'>• {} pending</span>", format_number(pending))
    } else {
        String::new()
    };

    let rows = if page.rows.is_empty() {
        "<tr><td colspan='6' class='text-center py-8 text-gray-500'>No expenses found</td></tr>".to_string()
    } else {
        page.rows.iter().map(|record| render_row(record)).collect::<String>()
    };

    format!(
        r#"<div class='text-gray-500 mb-2'>Showing {} of {} records{}</div>
<div class='border rounded-lg overflow-x-auto'>
    <table class='w-full text-left'>
        <thead class='bg-gray-50 text-sm text-gray-600'>
            <tr>
                <th class='px-4 py-2'>Approval Subject</th>
                <th class='px-4 py-2'>Request Owner</th>
                <th class='px-4 py-2'>Category</th>
                <th class='px-4 py-2'>Total Amount</th>
                <th class='px-4 py-2'>Request Status</th>
                <th class='px-4 py-2 text-center'>Actions</th>
            </tr>
        </thead>
        <tbody>{}</tbody>
    </table>
</div>
{}"#,
        format_number(page.filtered_count),
        format_number(page.total_count),
        pending_html,
        rows,
        render_pagination(page)
    )
}

/// Confirmation dialog for `decision` on `record`
pub fn render_dialog(record: &ExpenseRecord, decision: Decision) -> String {
    let subject = if record.approval_subject.is_empty() {
        String::new()
    } else {
        format!(
            "<div class='mb-2'><span class='font-medium'>{}</span></div>",
            escape_html(&record.approval_subject)
        )
    };
    let confirm_class = match decision {
        Decision::Approve => "bg-indigo-600 hover:bg-indigo-700",
        Decision::Reject => "bg-red-600 hover:bg-red-700",
    };

    format!(
        r#"<div class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' role='dialog'>
    <div class='bg-white rounded-xl shadow-2xl w-full max-w-lg p-6'>
        <h2 class='text-xl font-bold'>{} Expense</h2>
        <div class='text-gray-600 mt-2'>
            {}
            {} expense for <span class='font-medium'>{}</span> - {}
        </div>
        <form hx-post='/expenses/decision/confirm' hx-target='#modal' class='mt-4 space-y-4'>
            <div class='space-y-2'>
                <label for='comment' class='block text-sm font-medium'>Comments (Optional)</label>
                <textarea id='comment' name='comment' rows='4' placeholder='Add any comments about this decision...'
                    class='w-full px-3 py-2 border rounded-lg'></textarea>
            </div>
            <div class='flex justify-end gap-2'>
                <button type='button' hx-post='/expenses/decision/cancel' hx-target='#modal' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Cancel</button>
                <button type='submit' class='px-4 py-2 text-white rounded-lg {}'>Confirm {}</button>
            </div>
        </form>
    </div>
</div>"#,
        decision.title(),
        subject,
        decision.progressive(),
        escape_html(&record.employee_name),
        display_amount(record),
        confirm_class,
        decision.noun()
    )
}

/// Error shown in the dialog slot
pub fn render_inline_error(message: &str) -> String {
    format!(
        r#"<div class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' role='alertdialog'>
    <div class='bg-white rounded-xl shadow-2xl w-full max-w-md p-6'>
        <p class='text-red-600' role='alert'>{}</p>
        <div class='flex justify-end mt-4'>
            <button hx-post='/expenses/decision/cancel' hx-target='#modal' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Close</button>
        </div>
    </div>
</div>"#,
        escape_html(message)
    )
}

/// Replaces `#decision-poller`. With a delay it fetches toasts once the
/// delay has passed; without one it goes idle.
pub fn decision_poller(delay_ms: Option<u128>) -> String {
    match delay_ms {
        Some(ms) => format!(
            "<div id='decision-poller' hx-swap-oob='true' hx-get='/notifications?refresh=1' hx-trigger='load delay:{}ms' hx-target='#toasts' hx-swap='beforeend'></div>",
            ms
        ),
        None => "<div id='decision-poller' hx-swap-oob='true'></div>".to_string(),
    }
}
