//! Deterministic provider backed by a fixed record list

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{validate_records, ExpenseProvider, ExpenseRecord, ExpenseStatus, ProviderError};

/// Hands every session a copy of the same records
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    records: Vec<ExpenseRecord>,
}

impl FixtureProvider {
    pub fn new(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON array
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let records: Vec<ExpenseRecord> = serde_json::from_str(json)?;
        validate_records(&records)?;
        Ok(Self { records })
    }

    /// `count` pending records `EXP-1000`.. with distinct employees
    pub fn numbered(count: usize) -> Self {
        let records = (0..count)
            .map(|i| {
                Self::record(
                    &format!("EXP-{}", 1000 + i),
                    &format!("Employee {}", i),
                    ExpenseStatus::Pending,
                )
            })
            .collect();
        Self { records }
    }

    /// Build a record with neutral defaults for the fields tests rarely care about
    pub fn record(id: &str, employee_name: &str, status: ExpenseStatus) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            approval_subject: "Expense Reimbursement Request".to_string(),
            employee_name: employee_name.to_string(),
            amount: Decimal::new(10000, 2),
            currency: "USD".to_string(),
            category: "Office Supplies".to_string(),
            description: "Office supplies restocking".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or_default(),
            approval_comments: String::new(),
            status,
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }
}

#[async_trait]
impl ExpenseProvider for FixtureProvider {
    async fn fetch(&self) -> Result<Vec<ExpenseRecord>, ProviderError> {
        validate_records(&self.records)?;
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered() {
        let provider = FixtureProvider::numbered(25);
        assert_eq!(provider.records().len(), 25);
        assert_eq!(provider.records()[0].id, "EXP-1000");
        assert_eq!(provider.records()[24].id, "EXP-1024");
        assert!(provider.records().iter().all(|r| r.is_pending()));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "id": "EXP-7",
            "approvalSubject": "Travel Expense Claim",
            "employeeName": "John Smith",
            "amount": "250.00",
            "currency": "USD",
            "category": "Travel",
            "description": "Taxi to client office",
            "date": "2025-10-12",
            "status": "pending"
        }]"#;
        let provider = FixtureProvider::from_json(json).unwrap();
        let record = &provider.records()[0];
        assert_eq!(record.employee_name, "John Smith");
        assert_eq!(record.amount, Decimal::new(25000, 2));
        assert_eq!(record.approval_comments, "");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(FixtureProvider::from_json("{"), Err(ProviderError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_fetch_returns_copies() {
        let provider = FixtureProvider::numbered(3);
        let mut first = provider.fetch().await.unwrap();
        first[0].status = ExpenseStatus::Approved;
        let second = provider.fetch().await.unwrap();
        assert_eq!(second[0].status, ExpenseStatus::Pending);
    }
}
