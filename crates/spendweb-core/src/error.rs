//! Error types for spendweb-core
//!
//! This module provides error handling for the expense review core,
//! including error codes, detailed messages, and suggestions.

use serde::{Deserialize, Serialize};
use spendweb_provider::{ExpenseStatus, ProviderError};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No session cookie or unknown session
    NotLoggedIn,
    /// Expense record not found
    RecordNotFound,
    /// Status change not allowed from the current status
    InvalidTransition,
    /// A decision is still being submitted
    WorkflowBusy,
    /// Confirm or cancel without an open dialog
    NoPendingDecision,
    /// Validation error
    ValidationError,
    /// Duplicate entry
    DuplicateEntry,
    /// Data provider failed
    ProviderError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoggedIn => write!(f, "NOT_LOGGED_IN"),
            ErrorCode::RecordNotFound => write!(f, "RECORD_NOT_FOUND"),
            ErrorCode::InvalidTransition => write!(f, "INVALID_TRANSITION"),
            ErrorCode::WorkflowBusy => write!(f, "WORKFLOW_BUSY"),
            ErrorCode::NoPendingDecision => write!(f, "NO_PENDING_DECISION"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
            ErrorCode::ProviderError => write!(f, "PROVIDER_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for spendweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Expense not found: {id}")]
    RecordNotFound { id: String },

    #[error("Expense {id} is already {status}")]
    InvalidTransition { id: String, status: ExpenseStatus },

    #[error("Another decision is still being submitted")]
    WorkflowBusy,

    #[error("No decision is awaiting confirmation")]
    NoPendingDecision,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },

    #[error("Provider error: {message}")]
    ProviderError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoggedIn => ErrorCode::NotLoggedIn,
            CoreError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            CoreError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            CoreError::WorkflowBusy => ErrorCode::WorkflowBusy,
            CoreError::NoPendingDecision => ErrorCode::NoPendingDecision,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            CoreError::ProviderError { .. } => ErrorCode::ProviderError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoggedIn => ErrorSeverity::Info,
            CoreError::RecordNotFound { .. } => ErrorSeverity::Warning,
            CoreError::InvalidTransition { .. } => ErrorSeverity::Warning,
            CoreError::WorkflowBusy => ErrorSeverity::Info,
            CoreError::NoPendingDecision => ErrorSeverity::Info,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Error,
            CoreError::ProviderError { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoggedIn => {
                details = details.with_suggestion(
                    "Sign in at /login to start a manager session.".to_string()
                );
            }
            CoreError::RecordNotFound { id } => {
                details = details.with_detail(serde_json::json!({ "id": id }));
                details = details.with_suggestion(
                    "Use the /api/expenses endpoint to list the session's expenses.".to_string()
                );
            }
            CoreError::InvalidTransition { id, status } => {
                details = details.with_detail(serde_json::json!({ "id": id, "status": status }));
                details = details.with_suggestion(
                    "Only pending expenses can be approved or rejected.".to_string()
                );
            }
            CoreError::WorkflowBusy => {
                details = details.with_suggestion(
                    "Wait for the previous decision to finish, then try again.".to_string()
                );
            }
            CoreError::ValidationError { message } => {
                details = details.with_detail(serde_json::json!({ "validation_message": message }));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<ProviderError> for CoreError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::DuplicateId { id } => CoreError::DuplicateEntry { entry: id },
            other => CoreError::ProviderError { message: other.to_string() },
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Session the error happened in
    pub session_id: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            session_id: None,
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    pub fn with_session(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let message = format!(
            "[{}] {} - Operation: {} - Session: {:?} - Data: {}",
            error.code(),
            error,
            context.operation,
            context.session_id,
            context.data
        );
        match error.severity() {
            ErrorSeverity::Info => log::info!(target: "spendweb::error", "{}", message),
            ErrorSeverity::Warning => log::warn!(target: "spendweb::error", "{}", message),
            ErrorSeverity::Error => log::error!(target: "spendweb::error", "{}", message),
        }
    }
}

// ==================== Tests ====================
