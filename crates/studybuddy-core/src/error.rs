//! Core error types for studybuddy-core.
//!
//! Economy errors are local and recoverable: the operation that raised one
//! left the state untouched. Storage errors never roll back in-memory state.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studybuddy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected ledger, check-in or shop operation
    #[error("{0}")]
    Economy(#[from] EconomyError),

    /// Snapshot persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Rejections raised by the ledger, the check-in engine and the shop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// Credit or debit amount was zero or negative
    #[error("Invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount { amount: i64 },

    /// Balance would go negative
    #[error("Not enough coins: balance is {balance}, {required} required")]
    InsufficientFunds { balance: u32, required: u32 },

    /// Item already in the purchased set
    #[error("Item '{item_id}' is already owned")]
    AlreadyOwned { item_id: String },

    /// Item id not in the catalog
    #[error("Unknown shop item: {item_id}")]
    UnknownItem { item_id: String },

    /// Equipping an item that was never purchased
    #[error("Item '{item_id}' has not been purchased")]
    NotOwned { item_id: String },

    /// Only themes and music can be equipped
    #[error("Item '{item_id}' cannot be equipped")]
    NotEquippable { item_id: String },

    #[error("Unknown task: {id}")]
    UnknownTask { id: String },

    #[error("Reflection content is empty")]
    EmptyReflection,
}

impl EconomyError {
    /// Stable snake_case name, used as `errorKind` in JSON outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            EconomyError::InvalidAmount { .. } => "invalid_amount",
            EconomyError::InsufficientFunds { .. } => "insufficient_funds",
            EconomyError::AlreadyOwned { .. } => "already_owned",
            EconomyError::UnknownItem { .. } => "unknown_item",
            EconomyError::NotOwned { .. } => "not_owned",
            EconomyError::NotEquippable { .. } => "not_equippable",
            EconomyError::UnknownTask { .. } => "unknown_task",
            EconomyError::EmptyReflection => "empty_reflection",
        }
    }
}

/// Snapshot load/save errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the snapshot database
    #[error("Failed to open snapshot database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Stored snapshot could not be decoded, or state could not be encoded
    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Injected failure (quota exceeded, read-only medium)
    #[error("Snapshot write rejected: {0}")]
    WriteRejected(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
