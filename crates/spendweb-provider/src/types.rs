//! Expense record types shared by providers and the core store

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Review status of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Awaiting a manager decision
    Pending,
    /// Approved by a manager (terminal)
    Approved,
    /// Rejected by a manager (terminal)
    Rejected,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 3] = [
        ExpenseStatus::Pending,
        ExpenseStatus::Approved,
        ExpenseStatus::Rejected,
    ];

    pub fn is_pending(&self) -> bool {
        matches!(self, ExpenseStatus::Pending)
    }

    /// Lowercase word, as searched and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Rejected => "rejected",
        }
    }

    /// Capitalized badge label
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "Pending",
            ExpenseStatus::Approved => "Approved",
            ExpenseStatus::Rejected => "Rejected",
        }
    }
}

impl Default for ExpenseStatus {
    fn default() -> Self {
        ExpenseStatus::Pending
    }
}

impl std::str::FromStr for ExpenseStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ExpenseStatus::Pending),
            "approved" => Ok(ExpenseStatus::Approved),
            "rejected" => Ok(ExpenseStatus::Rejected),
            _ => Err(format!("Invalid expense status: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single expense report submitted by a team member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Unique identifier (e.g., "EXP-1000")
    pub id: String,
    /// Display title of the approval request
    pub approval_subject: String,
    /// Request owner
    pub employee_name: String,
    /// Non-negative amount
    pub amount: Decimal,
    /// Currency code (e.g., "USD")
    pub currency: String,
    pub category: String,
    pub description: String,
    /// Expense date
    pub date: NaiveDate,
    /// Free-text comments, may be empty
    #[serde(default)]
    pub approval_comments: String,
    #[serde(default)]
    pub status: ExpenseStatus,
}

impl ExpenseRecord {
    /// Date as shown in the table tooltip (e.g., "10/5/2025")
    pub fn display_date(&self) -> String {
        self.date.format("%-m/%-d/%Y").to_string()
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn has_comments(&self) -> bool {
        !self.approval_comments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!("Pending".parse::<ExpenseStatus>(), Ok(ExpenseStatus::Pending));
        assert_eq!("approved".parse::<ExpenseStatus>(), Ok(ExpenseStatus::Approved));
        assert_eq!("REJECTED".parse::<ExpenseStatus>(), Ok(ExpenseStatus::Rejected));
        assert!("closed".parse::<ExpenseStatus>().is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExpenseStatus::Pending.to_string(), "pending");
        assert_eq!(ExpenseStatus::Rejected.label(), "Rejected");
        assert!(ExpenseStatus::Pending.is_pending());
        assert!(!ExpenseStatus::Approved.is_pending());
    }

    #[test]
    fn test_record_json_shape() {
        let record = ExpenseRecord {
            id: "EXP-1000".to_string(),
            approval_subject: "Travel Expense Claim".to_string(),
            employee_name: "John Smith".to_string(),
            amount: Decimal::new(12050, 2),
            currency: "USD".to_string(),
            category: "Travel".to_string(),
            description: "Hotel accommodation".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            approval_comments: String::new(),
            status: ExpenseStatus::Pending,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["employeeName"], "John Smith");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["date"], "2025-10-05");
        assert_eq!(record.display_date(), "10/5/2025");
        assert!(!record.has_comments());
    }
}
