//! Expense review workflow and per-manager session state

pub mod error;
pub mod query;
pub mod session;
pub mod store;
pub mod summary;
pub mod workflow;

pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use query::{Page, TableView};
pub use session::{
    schedule_decision, Notification, NotificationKind, Session, SessionHandle, SessionOptions,
    SessionRegistry, SubmissionOutcome,
};
pub use spendweb_config::View;
pub use spendweb_provider::{ExpenseRecord, ExpenseStatus, ProviderRef};
pub use store::ExpenseStore;
pub use summary::DashboardSummary;
pub use workflow::{ApprovalWorkflow, Decision, PendingDecision, WorkflowState};
