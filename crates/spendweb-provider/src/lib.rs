//! Expense data providers
//!
//! A session's records come from an [`ExpenseProvider`]. The dashboard uses
//! the random [`MockExpenseProvider`]; tests seed sessions from a
//! [`FixtureProvider`] so results are deterministic.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

pub mod error;
pub mod fixture;
pub mod mock;
pub mod types;

pub use error::ProviderError;
pub use fixture::FixtureProvider;
pub use mock::{MockExpenseProvider, MockOptions};
pub use types::{ExpenseRecord, ExpenseStatus};

/// Provider reference type
pub type ProviderRef = Arc<dyn ExpenseProvider>;

/// Source of the records a new manager session starts with
#[async_trait]
pub trait ExpenseProvider: Send + Sync {
    /// Produce a fresh collection of expense records
    async fn fetch(&self) -> Result<Vec<ExpenseRecord>, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Check the collection-level invariants: unique ids and non-negative amounts
pub fn validate_records(records: &[ExpenseRecord]) -> Result<(), ProviderError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(ProviderError::DuplicateId { id: record.id.clone() });
        }
        if record.amount.is_sign_negative() && !record.amount.is_zero() {
            return Err(ProviderError::InvalidRecord {
                id: record.id.clone(),
                message: format!("amount must not be negative, got {}", record.amount),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_records_duplicate() {
        let a = FixtureProvider::record("EXP-1", "John Smith", ExpenseStatus::Pending);
        let b = FixtureProvider::record("EXP-1", "Sarah Johnson", ExpenseStatus::Approved);
        let err = validate_records(&[a, b]).unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateId { ref id } if id == "EXP-1"));
    }

    #[test]
    fn test_validate_records_negative_amount() {
        let mut a = FixtureProvider::record("EXP-1", "John Smith", ExpenseStatus::Pending);
        a.amount = Decimal::new(-100, 2);
        assert!(matches!(validate_records(&[a]), Err(ProviderError::InvalidRecord { .. })));
    }

    #[tokio::test]
    async fn test_provider_trait_object() {
        let provider: ProviderRef = Arc::new(FixtureProvider::new(vec![
            FixtureProvider::record("EXP-1", "John Smith", ExpenseStatus::Pending),
        ]));
        let records = provider.fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(provider.name(), "fixture");
    }
}
