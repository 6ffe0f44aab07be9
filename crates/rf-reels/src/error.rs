//! Error types for reel spin orchestration
//!
//! Every variant is a fail-closed rejection: the call that produced it left
//! the orchestrator, ledger and reels exactly as they were.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Insufficient balance: {balance} < bet {bet}")]
    InsufficientBalance { balance: u64, bet: u64 },

    #[error("Spin already in progress (phase: {phase})")]
    AlreadySpinning { phase: &'static str },

    #[error("No payout entry for symbol {symbol_id} x{count}")]
    UnknownPayout { symbol_id: u32, count: u8 },

    #[error("Lifecycle misuse: {0}")]
    LifecycleMisuse(&'static str),

    #[error("Expected {expected} symbol textures, got {actual}")]
    TextureCount { expected: usize, actual: usize },

    #[error("Invalid timing: {0}")]
    InvalidTiming(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
