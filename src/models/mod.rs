//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod balance;

// Re-export commonly used models
pub use balance::{BalanceDocument, BalanceRecord, BalanceTotals, OverdraftPolicy, ResetOutcome, UpsertOutcome};
