//! Random mock data generator used to seed dashboard sessions

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::sync::Mutex;

use crate::{ExpenseProvider, ExpenseRecord, ExpenseStatus, ProviderError};

const EMPLOYEES: &[&str] = &[
    "John Smith",
    "Sarah Johnson",
    "Michael Brown",
    "Emily Davis",
    "David Wilson",
    "Jessica Martinez",
    "Robert Garcia",
    "Jennifer Anderson",
    "William Taylor",
    "Ashley Thomas",
    "James Moore",
    "Amanda Jackson",
];

const CATEGORIES: &[&str] = &[
    "Travel",
    "Office Supplies",
    "Meals & Entertainment",
    "Software",
    "Training",
    "Transportation",
];

const DESCRIPTIONS: &[&str] = &[
    "Client meeting lunch",
    "Conference registration fee",
    "Office equipment purchase",
    "Team building dinner",
    "Business trip expenses",
    "Software subscription renewal",
    "Training course materials",
    "Taxi to client office",
    "Hotel accommodation",
    "Office supplies restocking",
];

const APPROVAL_SUBJECTS: &[&str] = &[
    "Expense Reimbursement Request",
    "Travel Expense Claim",
    "Office Supply Purchase",
    "Client Entertainment Expense",
    "Training Program Fee",
    "Conference Attendance Cost",
    "Software License Purchase",
    "Transportation Expense",
    "Team Building Activity",
    "Business Meal Expense",
];

const PRESET_COMMENT: &str = "Approved as per company policy";

/// Generator settings
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Records per session
    pub count: usize,
    pub currency: String,
    /// Numeric part of the first id
    pub id_start: u32,
    /// Fixed seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            count: 25,
            currency: "USD".to_string(),
            id_start: 1000,
            seed: None,
        }
    }
}

/// Generates a new random collection on every fetch
pub struct MockExpenseProvider {
    options: MockOptions,
    rng: Mutex<StdRng>,
}

impl MockExpenseProvider {
    pub fn new(options: MockOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            options,
            rng: Mutex::new(rng),
        }
    }

    pub fn options(&self) -> &MockOptions {
        &self.options
    }

    fn generate(&self, rng: &mut StdRng) -> Vec<ExpenseRecord> {
        (0..self.options.count)
            .map(|i| {
                let day = rng.gen_range(1..=30);
                ExpenseRecord {
                    id: format!("EXP-{}", self.options.id_start as usize + i),
                    approval_subject: pick(rng, APPROVAL_SUBJECTS),
                    employee_name: pick(rng, EMPLOYEES),
                    amount: Decimal::from(rng.gen_range(50..2050u32)),
                    currency: self.options.currency.clone(),
                    category: pick(rng, CATEGORIES),
                    description: pick(rng, DESCRIPTIONS),
                    date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap_or_default(),
                    approval_comments: if i % 3 == 0 {
                        PRESET_COMMENT.to_string()
                    } else {
                        String::new()
                    },
                    status: *ExpenseStatus::ALL.choose(rng).unwrap_or(&ExpenseStatus::Pending),
                }
            })
            .collect()
    }
}

impl Default for MockExpenseProvider {
    fn default() -> Self {
        Self::new(MockOptions::default())
    }
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

#[async_trait]
impl ExpenseProvider for MockExpenseProvider {
    async fn fetch(&self) -> Result<Vec<ExpenseRecord>, ProviderError> {
        let mut rng = self.rng.lock().map_err(|_| ProviderError::FixtureError {
            message: "mock generator lock poisoned".to_string(),
        })?;
        let records = self.generate(&mut rng);
        log::debug!("Generated {} mock expense records", records.len());
        Ok(records)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_records;

    fn seeded(seed: u64) -> MockExpenseProvider {
        MockExpenseProvider::new(MockOptions { seed: Some(seed), ..MockOptions::default() })
    }

    #[tokio::test]
    async fn test_generates_25_valid_records() {
        let records = MockExpenseProvider::default().fetch().await.unwrap();
        assert_eq!(records.len(), 25);
        assert!(validate_records(&records).is_ok());
        assert_eq!(records[0].id, "EXP-1000");
        assert_eq!(records[24].id, "EXP-1024");
    }

    #[tokio::test]
    async fn test_field_ranges() {
        let records = seeded(7).fetch().await.unwrap();
        for (i, record) in records.iter().enumerate() {
            assert!(record.amount >= Decimal::from(50) && record.amount < Decimal::from(2050));
            assert_eq!(record.currency, "USD");
            assert!(EMPLOYEES.contains(&record.employee_name.as_str()));
            assert!(CATEGORIES.contains(&record.category.as_str()));
            assert!(DESCRIPTIONS.contains(&record.description.as_str()));
            assert!(APPROVAL_SUBJECTS.contains(&record.approval_subject.as_str()));
            assert_eq!(record.has_comments(), i % 3 == 0);
            assert_eq!(record.date.format("%Y-%m").to_string(), "2025-10");
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_records() {
        let a = seeded(42).fetch().await.unwrap();
        let b = seeded(42).fetch().await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_custom_count_and_currency() {
        let provider = MockExpenseProvider::new(MockOptions {
            count: 3,
            currency: "EUR".to_string(),
            id_start: 500,
            seed: Some(1),
        });
        let records = provider.fetch().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].id, "EXP-502");
        assert!(records.iter().all(|r| r.currency == "EUR"));
    }
}
