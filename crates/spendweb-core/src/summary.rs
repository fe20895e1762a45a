//! Aggregate metrics for the dashboard summary cards

use rust_decimal::Decimal;
use serde::Serialize;
use spendweb_provider::{ExpenseRecord, ExpenseStatus};

/// Counts by status and the approved total, derived on every render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
    /// Sum of approved amounts. Assumes a single currency.
    pub approved_amount: Decimal,
    pub currency: String,
}

impl DashboardSummary {
    pub fn from_records(records: &[ExpenseRecord], currency: &str) -> Self {
        let mut summary = Self {
            pending: 0,
            approved: 0,
            rejected: 0,
            total: records.len(),
            approved_amount: Decimal::ZERO,
            currency: currency.to_string(),
        };

        for record in records {
            match record.status {
                ExpenseStatus::Pending => summary.pending += 1,
                ExpenseStatus::Approved => {
                    summary.approved += 1;
                    summary.approved_amount += record.amount;
                }
                ExpenseStatus::Rejected => summary.rejected += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendweb_provider::FixtureProvider;

    #[test]
    fn test_counts_and_approved_sum() {
        let mut a = FixtureProvider::record("EXP-1", "John Smith", ExpenseStatus::Approved);
        a.amount = Decimal::new(12050, 2);
        let mut b = FixtureProvider::record("EXP-2", "Sarah Johnson", ExpenseStatus::Approved);
        b.amount = Decimal::from(300);
        let mut c = FixtureProvider::record("EXP-3", "Emily Davis", ExpenseStatus::Rejected);
        c.amount = Decimal::from(999);
        let d = FixtureProvider::record("EXP-4", "David Wilson", ExpenseStatus::Pending);

        let summary = DashboardSummary::from_records(&[a, b, c, d], "USD");
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.approved_amount, Decimal::new(42050, 2));
    }

    #[test]
    fn test_empty() {
        let summary = DashboardSummary::from_records(&[], "USD");
        assert_eq!(summary.total, 0);
        assert_eq!(summary.approved_amount, Decimal::ZERO);
    }
}
