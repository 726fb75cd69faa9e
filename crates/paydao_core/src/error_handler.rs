use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum PayDaoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Deployment error: {0}")]
    Deployment(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Caused by operator input (missing form fields, bad amounts).
    UserError,
    /// RPC connectivity or timeout issue.
    NetworkError,
    /// The node or contract rejected the call.
    ContractError,
    /// Storage, file I/O and other internals.
    SystemError,
    /// Invalid or missing configuration.
    ConfigError,
}

impl PayDaoError {
    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::ConfigError,
            Self::Validation(_) => ErrorCategory::UserError,
            Self::Network(_) => ErrorCategory::NetworkError,
            Self::Contract(_) | Self::Deployment(_) => ErrorCategory::ContractError,
            Self::FileSystem(_) | Self::Internal(_) => ErrorCategory::SystemError,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(msg) => format!("Configuration issue: {msg}"),
            Self::Validation(msg) => format!("Please check your input: {msg}"),
            Self::Network(_) => "Network error. Check your RPC endpoint.".into(),
            Self::Contract(msg) => format!("Contract call failed: {msg}"),
            Self::Deployment(msg) => format!("Deployment failed: {msg}"),
            Self::FileSystem(msg) => format!("File error: {msg}"),
            Self::Internal(_) => "An unexpected error occurred.".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error classification for anyhow::Error (message-pattern based)
// ---------------------------------------------------------------------------

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Non-critical, log only.
    Low,
    /// Show to user, recoverable.
    Medium,
    /// Operation failed.
    High,
}

/// Fine-grained error category derived from message patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifiedCategory {
    Validation,
    Network,
    Reverted,
    InsufficientFunds,
    Nonce,
    Configuration,
    FileSystem,
    Internal,
}

/// Classified error with context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub severity: ErrorSeverity,
    pub category: ClassifiedCategory,
    pub message: String,
    pub user_message: String,
}

/// Classify an `anyhow::Error` into severity, category, and a user-friendly
/// message by inspecting the error chain for known patterns.
pub fn classify_error(error: &anyhow::Error) -> ClassifiedError {
    let msg = format!("{error:#}").to_lowercase();

    let (category, severity, user_msg) = if msg.contains("invalid amount")
        || msg.contains("invalid address")
    {
        (
            ClassifiedCategory::Validation,
            ErrorSeverity::Low,
            "Please check your input.",
        )
    } else if msg.contains("insufficient funds") {
        (
            ClassifiedCategory::InsufficientFunds,
            ErrorSeverity::High,
            "Insufficient funds for value and gas.",
        )
    } else if msg.contains("revert") || msg.contains("execution") {
        (
            ClassifiedCategory::Reverted,
            ErrorSeverity::High,
            "The contract rejected the transaction.",
        )
    } else if msg.contains("nonce") {
        (
            ClassifiedCategory::Nonce,
            ErrorSeverity::Medium,
            "Transaction nonce conflict. Try again.",
        )
    } else if msg.contains("timeout")
        || msg.contains("timed out")
        || msg.contains("connection")
        || msg.contains("dns")
    {
        (
            ClassifiedCategory::Network,
            ErrorSeverity::Medium,
            "Network error. Check your RPC endpoint.",
        )
    } else if msg.contains("no such file") || (msg.contains("not found") && msg.contains("file")) {
        (
            ClassifiedCategory::FileSystem,
            ErrorSeverity::Medium,
            "File not found.",
        )
    } else if msg.contains("config") || msg.contains("contract address") {
        (
            ClassifiedCategory::Configuration,
            ErrorSeverity::Medium,
            "Configuration error. Check settings.",
        )
    } else {
        (
            ClassifiedCategory::Internal,
            ErrorSeverity::Medium,
            "An unexpected error occurred.",
        )
    };

    ClassifiedError {
        severity,
        category,
        message: error.to_string(),
        user_message: user_msg.to_string(),
    }
}
