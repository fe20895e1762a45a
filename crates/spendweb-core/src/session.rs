//! Manager sessions
//!
//! A [`Session`] holds everything one logged-in manager sees: the records
//! seeded at login, the table's search/page state, the approval dialog, the
//! active view and queued toasts. Sessions live in a [`SessionRegistry`];
//! logout removes the session and cancels its background work.

use chrono::{DateTime, Utc};
use serde::Serialize;
use spendweb_config::{Config, View};
use spendweb_provider::{ExpenseRecord, ProviderRef};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::query::{self, Page, TableView};
use crate::store::ExpenseStore;
use crate::summary::DashboardSummary;
use crate::workflow::{ApprovalWorkflow, Decision, PendingDecision};

/// Shared handle to one session
pub type SessionHandle = Arc<RwLock<Session>>;

/// Settings applied to every new session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub page_size: usize,
    pub default_view: View,
    /// Display currency of the approved total
    pub currency: String,
    /// Simulated submission latency
    pub approval_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: query::DEFAULT_PAGE_SIZE,
            default_view: View::Expenses,
            currency: "USD".to_string(),
            approval_delay: Duration::from_millis(500),
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.pagination.records_per_page,
            default_view: config.session.default_view,
            currency: config.data.currency.clone(),
            approval_delay: Duration::from_millis(config.approval.delay_ms),
        }
    }
}

/// Toast kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown after a decision lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// State of one logged-in manager
#[derive(Debug)]
pub struct Session {
    id: String,
    manager_name: String,
    view: View,
    mobile_nav_open: bool,
    store: ExpenseStore,
    table: TableView,
    workflow: ApprovalWorkflow,
    notifications: VecDeque<Notification>,
    next_notification_id: u64,
    cancel: CancellationToken,
    options: SessionOptions,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        id: String,
        manager_name: String,
        records: Vec<ExpenseRecord>,
        options: SessionOptions,
    ) -> CoreResult<Self> {
        Ok(Self {
            id,
            manager_name,
            view: options.default_view,
            mobile_nav_open: false,
            store: ExpenseStore::new(records)?,
            table: TableView::default(),
            workflow: ApprovalWorkflow::new(),
            notifications: VecDeque::new(),
            next_notification_id: 1,
            cancel: CancellationToken::new(),
            options,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn manager_name(&self) -> &str {
        &self.manager_name
    }

    /// Time since login
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn workflow(&self) -> &ApprovalWorkflow {
        &self.workflow
    }

    // ==================== Navigation ====================

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch views; selecting a view also closes the mobile panel
    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.mobile_nav_open = false;
    }

    pub fn mobile_nav_open(&self) -> bool {
        self.mobile_nav_open
    }

    pub fn toggle_mobile_nav(&mut self) -> bool {
        self.mobile_nav_open = !self.mobile_nav_open;
        self.mobile_nav_open
    }

    // ==================== Table ====================

    /// Update search text and/or page and return the visible page.
    /// A changed search text resets to page 1 and ignores `page`.
    pub fn view_table(&mut self, search: Option<&str>, page: Option<usize>) -> Page<'_> {
        let changed = search.map(|q| self.table.set_query(q)).unwrap_or(false);
        if !changed {
            if let Some(page) = page {
                let filtered = query::filter(self.store.records(), self.table.query()).len();
                let count = query::page_count(filtered, self.options.page_size);
                self.table.go_to(page, count);
            }
        }
        self.current_page()
    }

    /// Page for the stored search text and page number
    pub fn current_page(&self) -> Page<'_> {
        query::paginate(
            self.store.records(),
            self.table.query(),
            self.table.page(),
            self.options.page_size,
        )
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_records(self.store.records(), &self.options.currency)
    }

    // ==================== Approval ====================

    /// Open the confirmation dialog for a record
    pub fn begin_decision(&mut self, id: &str, decision: Decision) -> CoreResult<&ExpenseRecord> {
        let record = self.store.require(id)?;
        self.workflow.begin(record, decision)?;
        Ok(record)
    }

    pub fn cancel_decision(&mut self) -> bool {
        self.workflow.cancel()
    }

    /// Confirm the open dialog; the dialog closes immediately
    pub fn confirm_decision(&mut self, comment: Option<&str>) -> CoreResult<PendingDecision> {
        self.workflow.confirm(comment)
    }

    /// Apply a confirmed decision, queue the matching toast and return the
    /// workflow to idle
    pub fn finish_decision(&mut self, pending: &PendingDecision) -> CoreResult<()> {
        let result = pending.apply(&mut self.store).map(|_| ());
        self.workflow.complete();

        match &result {
            Ok(()) => {
                log::info!(
                    "Session {}: expense {} {}",
                    self.id,
                    pending.record_id,
                    pending.decision.outcome()
                );
                self.notify(NotificationKind::Success, pending.success_message());
            }
            Err(e) => {
                let context = ErrorContext::new("finish_decision")
                    .with_session(&self.id)
                    .with_data("id", serde_json::json!(pending.record_id));
                DefaultErrorLogger.log_error(e, &context);
                self.notify(
                    NotificationKind::Error,
                    format!("Could not {} expense: {}", pending.decision, e),
                );
            }
        }

        result
    }

    // ==================== Notifications ====================

    pub fn notify(&mut self, kind: NotificationKind, message: String) {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push_back(Notification { id, kind, message });
    }

    pub fn pending_notifications(&self) -> usize {
        self.notifications.len()
    }

    /// Take all queued toasts
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // ==================== Lifetime ====================

    /// Token cancelled when the session ends
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn close(&self) {
        self.cancel.cancel();
    }
}

/// How a scheduled decision ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Applied,
    /// The store refused the change (record gone or no longer pending)
    Failed(String),
    /// The session ended before the delay elapsed
    Cancelled,
}

/// Apply `pending` to the session after `delay`, unless the session's
/// cancellation token fires first.
pub fn schedule_decision(
    session: SessionHandle,
    pending: PendingDecision,
    delay: Duration,
    token: CancellationToken,
) -> JoinHandle<SubmissionOutcome> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                log::info!("Decision on {} dropped: session ended", pending.record_id);
                SubmissionOutcome::Cancelled
            }
            _ = tokio::time::sleep(delay) => {
                let mut guard = session.write().await;
                if token.is_cancelled() {
                    return SubmissionOutcome::Cancelled;
                }
                match guard.finish_decision(&pending) {
                    Ok(()) => SubmissionOutcome::Applied,
                    Err(e) => SubmissionOutcome::Failed(e.to_string()),
                }
            }
        }
    })
}

/// All live manager sessions
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    provider: ProviderRef,
    options: SessionOptions,
}

impl SessionRegistry {
    pub fn new(provider: ProviderRef, options: SessionOptions) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            provider,
            options,
        }
    }

    /// Start a session for `name`, seeding fresh records from the provider.
    /// Any non-blank name is accepted.
    pub async fn login(&self, name: &str) -> CoreResult<SessionHandle> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError {
                message: "Please enter your name".to_string(),
            });
        }

        let records = self.provider.fetch().await?;
        let id = spendweb_utils::generate_id();
        let session = Session::new(id.clone(), name.to_string(), records, self.options.clone())?;
        log::info!(
            "Manager '{}' logged in (session {}, {} records from {} provider)",
            name,
            id,
            session.store().len(),
            self.provider.name()
        );

        let handle = Arc::new(RwLock::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        Ok(handle)
    }

    /// End a session, discarding its records and cancelling scheduled
    /// decisions. Returns whether the session existed.
    pub async fn logout(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id);
        match removed {
            Some(handle) => {
                let session = handle.read().await;
                session.close();
                log::info!(
                    "Manager '{}' logged out (session {}, open {}s)",
                    session.manager_name(),
                    id,
                    session.age().num_seconds()
                );
                true
            }
            None => false,
        }
    }

    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Look up a session, failing with `NotLoggedIn`
    pub async fn require(&self, id: Option<&str>) -> CoreResult<SessionHandle> {
        match id {
            Some(id) => self.get(id).await.ok_or(CoreError::NotLoggedIn),
            None => Err(CoreError::NotLoggedIn),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendweb_provider::{ExpenseStatus, FixtureProvider};

    fn records() -> Vec<ExpenseRecord> {
        let mut commented = FixtureProvider::record("EXP-2", "Sarah Johnson", ExpenseStatus::Pending);
        commented.approval_comments = "Approved as per company policy".to_string();
        vec![
            FixtureProvider::record("EXP-1", "John Smith", ExpenseStatus::Pending),
            commented,
            FixtureProvider::record("EXP-3", "Emily Davis", ExpenseStatus::Approved),
        ]
    }

    fn session() -> Session {
        Session::new("s1".to_string(), "Alex".to_string(), records(), SessionOptions::default()).unwrap()
    }

    fn fast_options() -> SessionOptions {
        SessionOptions {
            approval_delay: Duration::from_millis(10),
            ..SessionOptions::default()
        }
    }

    fn registry(records: Vec<ExpenseRecord>) -> SessionRegistry {
        SessionRegistry::new(Arc::new(FixtureProvider::new(records)), fast_options())
    }

    #[test]
    fn test_new_session_defaults() {
        let session = session();
        assert_eq!(session.manager_name(), "Alex");
        assert_eq!(session.view(), View::Expenses);
        assert!(!session.mobile_nav_open());
        assert!(session.workflow().is_idle());
        assert_eq!(session.table().page(), 1);
    }

    #[test]
    fn test_set_view_closes_mobile_nav() {
        let mut session = session();
        assert!(session.toggle_mobile_nav());
        session.set_view(View::Dashboard);
        assert_eq!(session.view(), View::Dashboard);
        assert!(!session.mobile_nav_open());
    }

    #[test]
    fn test_view_table_search_resets_page() {
        let mut session = Session::new(
            "s".to_string(),
            "Alex".to_string(),
            FixtureProvider::numbered(25).records().to_vec(),
            SessionOptions::default(),
        )
        .unwrap();

        let page = session.view_table(None, Some(3));
        assert_eq!(page.page, 3);
        assert_eq!(page.rows.len(), 5);

        let page = session.view_table(Some("employee"), Some(3));
        assert_eq!(page.page, 1);
        assert_eq!(page.query, "employee");

        let page = session.view_table(Some("employee"), Some(9));
        assert_eq!(page.page, 3);
        assert_eq!(session.table().page(), 3);
    }

    #[test]
    fn test_search_scenario_smith() {
        let mut session = session();
        let page = session.view_table(Some("smith"), None);
        assert_eq!(page.filtered_count, 1);
        assert_eq!(page.rows[0].employee_name, "John Smith");
    }

    #[test]
    fn test_finish_decision_approve_with_comment() {
        let mut session = session();
        session.begin_decision("EXP-1", Decision::Approve).unwrap();
        let pending = session.confirm_decision(Some("ok")).unwrap();
        session.finish_decision(&pending).unwrap();

        let record = session.store().get("EXP-1").unwrap();
        assert_eq!(record.status, ExpenseStatus::Approved);
        assert_eq!(record.approval_comments, "ok");
        assert!(session.workflow().is_idle());

        let toasts = session.drain_notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
        assert_eq!(toasts[0].message, "Expense approved successfully!");
        assert_eq!(session.pending_notifications(), 0);
    }

    #[test]
    fn test_cancel_changes_nothing() {
        let mut session = session();
        let before = session.store().records().to_vec();
        session.begin_decision("EXP-2", Decision::Reject).unwrap();
        assert!(session.cancel_decision());
        assert_eq!(session.store().records(), before.as_slice());
        assert!(matches!(session.confirm_decision(None), Err(CoreError::NoPendingDecision)));
    }

    #[test]
    fn test_begin_on_terminal_or_missing_record() {
        let mut session = session();
        assert!(matches!(
            session.begin_decision("EXP-3", Decision::Approve),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.begin_decision("EXP-404", Decision::Approve),
            Err(CoreError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_summary_follows_decisions() {
        let mut session = session();
        assert_eq!(session.summary().pending, 2);
        session.begin_decision("EXP-1", Decision::Reject).unwrap();
        let pending = session.confirm_decision(None).unwrap();
        session.finish_decision(&pending).unwrap();
        let summary = session.summary();
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.approved, 1);
    }

    #[tokio::test]
    async fn test_login_rejects_blank_name() {
        let registry = registry(records());
        assert!(matches!(registry.login("   ").await, Err(CoreError::ValidationError { .. })));
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_login_logout_lifecycle() {
        let registry = registry(records());
        let handle = registry.login("  Alex ").await.unwrap();
        let id = handle.read().await.id().to_string();
        assert_eq!(handle.read().await.manager_name(), "Alex");
        assert!(handle.read().await.age().num_seconds() >= 0);
        assert!(registry.get(&id).await.is_some());

        assert!(registry.logout(&id).await);
        assert!(registry.get(&id).await.is_none());
        assert!(!registry.logout(&id).await);
        assert!(handle.read().await.cancellation_token().is_cancelled());
        assert!(matches!(registry.require(Some(id.as_str())).await, Err(CoreError::NotLoggedIn)));
        assert!(matches!(registry.require(None).await, Err(CoreError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_each_login_gets_fresh_data() {
        let registry = registry(records());
        let first = registry.login("Alex").await.unwrap();
        {
            let mut session = first.write().await;
            session.begin_decision("EXP-1", Decision::Approve).unwrap();
            let pending = session.confirm_decision(None).unwrap();
            session.finish_decision(&pending).unwrap();
        }
        let second = registry.login("Alex").await.unwrap();
        let second = second.read().await;
        assert_eq!(second.store().get("EXP-1").unwrap().status, ExpenseStatus::Pending);
    }

    #[tokio::test]
    async fn test_scheduled_decision_applies_after_delay() {
        let registry = registry(records());
        let handle = registry.login("Alex").await.unwrap();

        let (pending, token) = {
            let mut session = handle.write().await;
            session.begin_decision("EXP-2", Decision::Reject).unwrap();
            (session.confirm_decision(Some("")).unwrap(), session.cancellation_token())
        };
        assert_eq!(
            handle.read().await.store().get("EXP-2").unwrap().status,
            ExpenseStatus::Pending
        );

        let outcome = schedule_decision(handle.clone(), pending, Duration::from_millis(10), token)
            .await
            .unwrap();
        assert_eq!(outcome, SubmissionOutcome::Applied);

        let session = handle.read().await;
        let record = session.store().get("EXP-2").unwrap();
        assert_eq!(record.status, ExpenseStatus::Rejected);
        assert_eq!(record.approval_comments, "Approved as per company policy");
        assert!(session.workflow().is_idle());
    }

    #[tokio::test]
    async fn test_logout_cancels_scheduled_decision() {
        let registry = registry(records());
        let handle = registry.login("Alex").await.unwrap();

        let (id, pending, token) = {
            let mut session = handle.write().await;
            session.begin_decision("EXP-1", Decision::Approve).unwrap();
            (
                session.id().to_string(),
                session.confirm_decision(None).unwrap(),
                session.cancellation_token(),
            )
        };

        let task = schedule_decision(handle.clone(), pending, Duration::from_secs(30), token);
        assert!(registry.logout(&id).await);

        assert_eq!(task.await.unwrap(), SubmissionOutcome::Cancelled);
        let session = handle.read().await;
        assert_eq!(session.store().get("EXP-1").unwrap().status, ExpenseStatus::Pending);
        assert_eq!(session.pending_notifications(), 0);
    }

    #[tokio::test]
    async fn test_failed_submission_queues_error_toast() {
        let registry = registry(records());
        let handle = registry.login("Alex").await.unwrap();

        let pending = PendingDecision {
            record_id: "EXP-3".to_string(),
            decision: Decision::Approve,
            comment: String::new(),
        };
        let token = handle.read().await.cancellation_token();
        let outcome = schedule_decision(handle.clone(), pending, Duration::from_millis(1), token)
            .await
            .unwrap();
        assert!(matches!(outcome, SubmissionOutcome::Failed(_)));

        let toasts = handle.write().await.drain_notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
    }
}
