//! Error types for the gamble engine
//!
//! Every failure in the engine is reported by return value. The root
//! [`EngineError`] wraps the per-area enums so callers can use `?` freely
//! and still match on the concrete reason.

use thiserror::Error;

/// Root error type for all engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Invalid range partition for the ranges mode
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// Failures reported by the currency, counter or chat collaborators
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A chat command that cannot be turned into a wager
    #[error("Entry rejected: {0}")]
    Entry(#[from] EntryError),

    /// Effect lists that cannot be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown gamble mode: '{0}'")]
    UnknownMode(String),

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Reasons a list of win ranges is not a legal partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("At least one range has to be configured.")]
    Empty,

    #[error("There cannot be ranges starting on a value less than 0.")]
    Negative,

    #[error("There are overlapping ranges.")]
    Overlap,

    #[error("The range has holes. E.g., if one range ends at 10, the next has to start at 11.")]
    NonContiguous,
}

/// Collaborator failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Currency update failed for {user}: {reason}")]
    CurrencyUpdateFailed { user: String, reason: String },

    #[error("Counter {0} not found")]
    CounterNotFound(String),

    #[error("Chat message could not be posted: {0}")]
    ChatFailed(String),
}

/// Why a chat command did not produce a gamble
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Trigger is not a command")]
    NotACommand,

    #[error("Invalid number of arguments to gambling command: {0}")]
    InvalidArgumentCount(usize),

    #[error("Cannot retrieve currency with ID {currency_id} for user {user}")]
    BalanceUnavailable { user: String, currency_id: String },

    #[error("Invalid format of argument to gambling command: {0}")]
    Unparseable(String),

    #[error("Wager of {wagered} exceeds balance of {balance}")]
    InsufficientBalance { wagered: i64, balance: i64 },

    #[error("Wager of {wagered} is below the minimum of {minimum}")]
    BelowMinimum { wagered: i64, minimum: i64 },
}

// Convenience type alias for Results
pub type EngineResult<T> = Result<T, EngineError>;
