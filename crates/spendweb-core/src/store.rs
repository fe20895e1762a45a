//! In-memory expense record store for one manager session

use spendweb_provider::{validate_records, ExpenseRecord};

use crate::error::{CoreError, CoreResult};
use crate::workflow::Decision;

/// Record collection of a session. Records only change through
/// [`ExpenseStore::apply_decision`].
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
}

impl ExpenseStore {
    /// Build a store, rejecting duplicate ids and negative amounts
    pub fn new(records: Vec<ExpenseRecord>) -> CoreResult<Self> {
        validate_records(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look up a record, failing with `RecordNotFound`
    pub fn require(&self, id: &str) -> CoreResult<&ExpenseRecord> {
        self.get(id).ok_or_else(|| CoreError::RecordNotFound { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply a manager decision to a pending record.
    ///
    /// A non-empty comment replaces `approval_comments` as typed; an empty
    /// one keeps the previous comments.
    pub fn apply_decision(
        &mut self,
        id: &str,
        decision: Decision,
        comment: &str,
    ) -> CoreResult<&ExpenseRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RecordNotFound { id: id.to_string() })?;

        if !record.status.is_pending() {
            return Err(CoreError::InvalidTransition {
                id: id.to_string(),
                status: record.status,
            });
        }

        record.status = decision.outcome();
        if !comment.is_empty() {
            record.approval_comments = comment.to_string();
        }

        Ok(record)
    }
}
