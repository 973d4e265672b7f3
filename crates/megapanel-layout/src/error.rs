#![forbid(unsafe_code)]

//! Errors for the fallible edges of the layout crate.
//!
//! Building a panel never fails; only configuration can be rejected.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("split multiplier must be at least 1 (got 0)")]
    InvalidMultiplier,

    #[error("default column count must be between {min} and {max} (got {value})")]
    DefaultColumnsOutOfRange { value: u8, min: u8, max: u8 },

    #[error("invalid layout config: {0}")]
    Config(#[from] serde_json::Error),
}
