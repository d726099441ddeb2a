//! Test helpers module
//!
//! This module provides utilities and helpers for testing the money-counter bot:
//! a mock Telegram Bot API and in-memory balance services.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod simple_test;

pub use telegram_mock::*;
pub use simple_test::*;
