//! Route modules for the API server
//!
//! - session: Login and logout
//! - dashboard: Summary view, mobile navigation, toasts, settings
//! - expenses: Expense table, search, pagination, approval dialog
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Page rendering

pub mod dashboard;
pub mod expenses;
pub mod session;
