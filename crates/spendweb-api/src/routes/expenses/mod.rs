//! Expense routes - Team expense table and approval workflow
//!
//! Features:
//! - Search across subject, employee, category, description and status
//! - Fixed-size pages with numbered pagination
//! - Approve/reject confirmation dialog with optional comment
//! - Deferred submission with a toast once the decision lands
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Page rendering and HTML fragments

pub mod api;
pub mod page;

pub use api::{
    api_expense_detail,
    api_expenses,
    htmx_approve_dialog,
    htmx_decision_cancel,
    htmx_decision_confirm,
    htmx_expenses_list,
    htmx_reject_dialog,
};

pub use page::page_expenses;
