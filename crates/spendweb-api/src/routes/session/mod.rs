//! Session routes - Manager login and logout
//!
//! Structure:
//! - api.rs: Form handlers that create and destroy sessions
//! - page.rs: Login page rendering

pub mod api;
pub mod page;

pub use api::{login_submit, logout_submit};
pub use page::page_login;
