//! Two-step approval workflow
//!
//! A manager picks approve or reject on a pending record, which opens a
//! confirmation dialog with an optional comment. Confirming closes the
//! dialog right away and hands back a [`PendingDecision`]; the caller applies
//! it to the store once the (simulated) submission finishes and then calls
//! [`ApprovalWorkflow::complete`].
//!
//! ```text
//! Idle --begin--> Confirming --confirm--> Submitting --complete--> Idle
//!                     |
//!                     +--cancel--> Idle
//! ```

use serde::{Deserialize, Serialize};
use spendweb_provider::{ExpenseRecord, ExpenseStatus};

use crate::error::{CoreError, CoreResult};
use crate::store::ExpenseStore;

/// Action chosen by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status the record ends up in
    pub fn outcome(&self) -> ExpenseStatus {
        match self {
            Decision::Approve => ExpenseStatus::Approved,
            Decision::Reject => ExpenseStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }

    /// "Approve" / "Reject"
    pub fn title(&self) -> &'static str {
        match self {
            Decision::Approve => "Approve",
            Decision::Reject => "Reject",
        }
    }

    /// "Approving" / "Rejecting"
    pub fn progressive(&self) -> &'static str {
        match self {
            Decision::Approve => "Approving",
            Decision::Reject => "Rejecting",
        }
    }

    /// "Approval" / "Rejection"
    pub fn noun(&self) -> &'static str {
        match self {
            Decision::Approve => "Approval",
            Decision::Reject => "Rejection",
        }
    }
}

impl std::str::FromStr for Decision {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(Decision::Approve),
            "reject" => Ok(Decision::Reject),
            _ => Err(format!("Invalid decision: {}", s)),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A confirmed decision waiting to be applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingDecision {
    pub record_id: String,
    pub decision: Decision,
    pub comment: String,
}

impl PendingDecision {
    /// Apply to the store; exactly one record changes on success
    pub fn apply<'a>(&self, store: &'a mut ExpenseStore) -> CoreResult<&'a ExpenseRecord> {
        store.apply_decision(&self.record_id, self.decision, &self.comment)
    }

    /// Toast text shown once the decision lands
    pub fn success_message(&self) -> String {
        format!("Expense {} successfully!", self.decision.outcome())
    }
}

/// Workflow state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    /// No dialog shown
    #[default]
    Idle,
    /// Dialog open for one record
    Confirming {
        record_id: String,
        decision: Decision,
        comment: String,
    },
    /// Confirmed; waiting for the submission to finish
    Submitting { pending: PendingDecision },
}

/// Per-session approval dialog state machine
#[derive(Debug, Clone, Default)]
pub struct ApprovalWorkflow {
    state: WorkflowState,
}

impl ApprovalWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, WorkflowState::Idle)
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.state, WorkflowState::Confirming { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting { .. })
    }

    /// Open the dialog for a pending record. Reopening while a dialog is
    /// already shown replaces it.
    pub fn begin(&mut self, record: &ExpenseRecord, decision: Decision) -> CoreResult<()> {
        if self.is_submitting() {
            return Err(CoreError::WorkflowBusy);
        }
        if !record.status.is_pending() {
            return Err(CoreError::InvalidTransition {
                id: record.id.clone(),
                status: record.status,
            });
        }
        self.state = WorkflowState::Confirming {
            record_id: record.id.clone(),
            decision,
            comment: String::new(),
        };
        Ok(())
    }

    /// Edit the comment of the open dialog
    pub fn set_comment(&mut self, text: &str) -> CoreResult<()> {
        match &mut self.state {
            WorkflowState::Confirming { comment, .. } => {
                *comment = text.to_string();
                Ok(())
            }
            _ => Err(CoreError::NoPendingDecision),
        }
    }

    /// Close the dialog without changing anything. Returns whether a dialog
    /// was open.
    pub fn cancel(&mut self) -> bool {
        if self.is_confirming() {
            self.state = WorkflowState::Idle;
            true
        } else {
            false
        }
    }

    /// Confirm the open dialog. `comment` overrides the stored comment text
    /// when given.
    pub fn confirm(&mut self, comment: Option<&str>) -> CoreResult<PendingDecision> {
        let pending = match &self.state {
            WorkflowState::Confirming { record_id, decision, comment: stored } => PendingDecision {
                record_id: record_id.clone(),
                decision: *decision,
                comment: comment.unwrap_or(stored).to_string(),
            },
            WorkflowState::Submitting { .. } => return Err(CoreError::WorkflowBusy),
            WorkflowState::Idle => return Err(CoreError::NoPendingDecision),
        };
        self.state = WorkflowState::Submitting { pending: pending.clone() };
        Ok(pending)
    }

    /// Submission finished (applied or failed); back to idle
    pub fn complete(&mut self) -> Option<PendingDecision> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Submitting { pending } => Some(pending),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Record and action of the open dialog
    pub fn confirming(&self) -> Option<(&str, Decision, &str)> {
        match &self.state {
            WorkflowState::Confirming { record_id, decision, comment } => {
                Some((record_id.as_str(), *decision, comment.as_str()))
            }
            _ => None,
        }
    }
}
