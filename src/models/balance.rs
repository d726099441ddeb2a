//! Balance model
//!
//! A chat keeps one [`BalanceDocument`]: budget categories mapped to their
//! limit and remaining balance. All record-level operations live here and
//! never touch storage.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{MoneyCounterError, Result};

/// Limit and remaining balance of one budget category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub limit: f64,
    pub balance: f64,
}

impl BalanceRecord {
    /// A fresh record with the whole limit available
    pub fn full(limit: f64) -> Self {
        Self { limit, balance: limit }
    }

    pub fn is_full(&self) -> bool {
        self.balance == self.limit
    }
}

/// Whether a spend may take a balance below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverdraftPolicy {
    #[default]
    Reject,
    Allow,
}

impl OverdraftPolicy {
    pub fn from_allow_negative(allow_negative: bool) -> Self {
        if allow_negative {
            OverdraftPolicy::Allow
        } else {
            OverdraftPolicy::Reject
        }
    }
}

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    /// The record already held exactly these values
    Unchanged,
}

/// Result of resetting every balance to its limit
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome {
    /// No categories exist
    Empty,
    /// Every balance already equaled its limit
    Unchanged,
    Reset {
        old: BalanceDocument,
        new: BalanceDocument,
    },
}

/// Sum of balances and limits over all categories
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BalanceTotals {
    pub balance: f64,
    pub limit: f64,
}

/// Per-chat mapping of category name to record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceDocument {
    categories: BTreeMap<String, BalanceRecord>,
}

impl BalanceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn get(&self, category: &str) -> Option<&BalanceRecord> {
        self.categories.get(category)
    }

    /// Categories in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BalanceRecord)> {
        self.categories.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn totals(&self) -> BalanceTotals {
        self.categories
            .values()
            .fold(BalanceTotals::default(), |totals, record| BalanceTotals {
                balance: totals.balance + record.balance,
                limit: totals.limit + record.limit,
            })
    }

    /// Set `category` to a full record of `limit`, discarding any previous balance
    pub fn upsert(&mut self, category: &str, limit: f64) -> UpsertOutcome {
        let record = BalanceRecord::full(limit);
        match self.categories.insert(category.to_string(), record) {
            None => UpsertOutcome::Created,
            Some(previous) if previous == record => UpsertOutcome::Unchanged,
            Some(_) => UpsertOutcome::Updated,
        }
    }

    /// Change the limit of an existing category, keeping its balance
    pub fn change_limit(&mut self, category: &str, limit: f64) -> Result<BalanceRecord> {
        let record = self.record_mut(category)?;
        record.limit = limit;
        Ok(*record)
    }

    /// Subtract `amount` from the category balance and return the new balance
    pub fn spend(&mut self, category: &str, amount: f64, policy: OverdraftPolicy) -> Result<f64> {
        let record = self.record_mut(category)?;
        let new_balance = record.balance - amount;

        if !new_balance.is_finite() {
            return Err(MoneyCounterError::BalanceOutOfRange {
                category: category.to_string(),
                amount,
            });
        }
        if policy == OverdraftPolicy::Reject && new_balance < 0.0 {
            return Err(MoneyCounterError::InsufficientFunds {
                category: category.to_string(),
                balance: record.balance,
                amount,
            });
        }

        record.balance = new_balance;
        Ok(new_balance)
    }

    pub fn remove(&mut self, category: &str) -> Result<BalanceRecord> {
        self.categories
            .remove(category)
            .ok_or_else(|| not_found(category))
    }

    /// Refill every category to its limit
    pub fn reset_all(&mut self) -> ResetOutcome {
        if self.is_empty() {
            return ResetOutcome::Empty;
        }
        if self.categories.values().all(BalanceRecord::is_full) {
            return ResetOutcome::Unchanged;
        }

        let old = self.clone();
        for record in self.categories.values_mut() {
            record.balance = record.limit;
        }

        ResetOutcome::Reset {
            old,
            new: self.clone(),
        }
    }

    fn record_mut(&mut self, category: &str) -> Result<&mut BalanceRecord> {
        self.categories
            .get_mut(category)
            .ok_or_else(|| not_found(category))
    }
}

impl FromIterator<(String, BalanceRecord)> for BalanceDocument {
    fn from_iter<I: IntoIterator<Item = (String, BalanceRecord)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

fn not_found(category: &str) -> MoneyCounterError {
    MoneyCounterError::CategoryNotFound {
        category: category.to_string(),
    }
}
