//! Services module
//!
//! This module contains business logic services

pub mod balance;

// Re-export commonly used services
pub use balance::BalanceService;
