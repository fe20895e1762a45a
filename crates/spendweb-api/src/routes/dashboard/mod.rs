//! Dashboard routes - Summary cards, navigation and notifications
//!
//! Structure:
//! - api.rs: JSON summary/settings, toast and mobile nav fragments
//! - page.rs: Summary page rendering

pub mod api;
pub mod page;

pub use api::{api_settings, api_summary, htmx_notifications, htmx_toggle_mobile_nav};
pub use page::page_dashboard;
