//! In-memory collaborators for tests and the command-line demo

use crate::common::traits::{ChatSink, CounterStore, CurrencyStore};
use crate::errors::{EngineResult, StoreError};
use crate::games::effects::CounterUpdateMode;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Balances, counters and a chat transcript kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    currencies: Mutex<HashSet<String>>,
    balances: Mutex<HashMap<(String, String), i64>>,
    counters: Mutex<HashMap<String, i64>>,
    transcript: Mutex<Vec<String>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a currency; users start at 0 in it
    pub fn with_currency(self, currency_id: &str) -> Self {
        lock(&self.currencies).insert(currency_id.to_string());
        self
    }

    pub fn with_balance(self, user: &str, currency_id: &str, amount: i64) -> Self {
        self.set_balance(user, currency_id, amount);
        self
    }

    pub fn with_counter(self, counter_id: &str, value: i64) -> Self {
        lock(&self.counters).insert(counter_id.to_string(), value);
        self
    }

    /// Sets a balance, registering the currency if needed
    pub fn set_balance(&self, user: &str, currency_id: &str, amount: i64) {
        lock(&self.currencies).insert(currency_id.to_string());
        lock(&self.balances).insert((user.to_string(), currency_id.to_string()), amount);
    }

    pub fn balance_of(&self, user: &str, currency_id: &str) -> Option<i64> {
        if !lock(&self.currencies).contains(currency_id) {
            return None;
        }
        let balances = lock(&self.balances);
        Some(
            balances
                .get(&(user.to_string(), currency_id.to_string()))
                .copied()
                .unwrap_or(0),
        )
    }

    pub fn counter_of(&self, counter_id: &str) -> Option<i64> {
        lock(&self.counters).get(counter_id).copied()
    }

    /// Messages posted so far, oldest first
    pub fn transcript(&self) -> Vec<String> {
        lock(&self.transcript).clone()
    }
}

#[async_trait]
impl CurrencyStore for InMemoryLedger {
    async fn balance(&self, user: &str, currency_id: &str) -> EngineResult<Option<i64>> {
        Ok(self.balance_of(user, currency_id))
    }

    async fn adjust(&self, user: &str, currency_id: &str, signed_amount: i64) -> EngineResult<()> {
        if !lock(&self.currencies).contains(currency_id) {
            return Err(StoreError::CurrencyUpdateFailed {
                user: user.to_string(),
                reason: format!("unknown currency {}", currency_id),
            }
            .into());
        }

        let mut balances = lock(&self.balances);
        let balance = balances
            .entry((user.to_string(), currency_id.to_string()))
            .or_insert(0);
        *balance = balance.saturating_add(signed_amount);
        Ok(())
    }
}

#[async_trait]
impl CounterStore for InMemoryLedger {
    async fn value(&self, counter_id: &str) -> EngineResult<Option<i64>> {
        Ok(self.counter_of(counter_id))
    }

    async fn update(
        &self,
        counter_id: &str,
        mode: CounterUpdateMode,
        value: i64,
    ) -> EngineResult<()> {
        let mut counters = lock(&self.counters);
        let Some(counter) = counters.get_mut(counter_id) else {
            return Err(StoreError::CounterNotFound(counter_id.to_string()).into());
        };

        match mode {
            CounterUpdateMode::Increment => *counter = counter.saturating_add(value),
            CounterUpdateMode::Set => *counter = value,
        }
        Ok(())
    }
}

#[async_trait]
impl ChatSink for InMemoryLedger {
    async fn post(&self, text: &str) -> EngineResult<()> {
        tracing::debug!("chat: {}", text);
        lock(&self.transcript).push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_balances() {
        let ledger = InMemoryLedger::new()
            .with_currency("points")
            .with_balance("alice", "points", 500);

        assert_eq!(ledger.balance("alice", "points").await.unwrap(), Some(500));
        assert_eq!(ledger.balance("bob", "points").await.unwrap(), Some(0));
        assert_eq!(ledger.balance("alice", "gems").await.unwrap(), None);

        ledger.adjust("alice", "points", -200).await.unwrap();
        ledger.adjust("bob", "points", 50).await.unwrap();
        assert_eq!(ledger.balance_of("alice", "points"), Some(300));
        assert_eq!(ledger.balance_of("bob", "points"), Some(50));

        assert!(ledger.adjust("alice", "gems", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_counters() {
        let ledger = InMemoryLedger::new().with_counter("jackpot", 100);

        ledger.update("jackpot", CounterUpdateMode::Increment, 25).await.unwrap();
        assert_eq!(ledger.value("jackpot").await.unwrap(), Some(125));

        ledger.update("jackpot", CounterUpdateMode::Set, 0).await.unwrap();
        assert_eq!(ledger.counter_of("jackpot"), Some(0));

        assert!(ledger.update("missing", CounterUpdateMode::Set, 1).await.is_err());
        assert_eq!(ledger.value("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_errors() {
        use crate::errors::EngineError;

        let ledger = InMemoryLedger::new();

        let currency = ledger.adjust("alice", "gems", 10).await;
        assert!(matches!(
            currency,
            Err(EngineError::Store(StoreError::CurrencyUpdateFailed { .. }))
        ));

        let counter = ledger.update("pot", CounterUpdateMode::Increment, 1).await;
        assert!(matches!(
            counter,
            Err(EngineError::Store(StoreError::CounterNotFound(id))) if id == "pot"
        ));
    }

    #[tokio::test]
    async fn test_transcript() {
        let ledger = InMemoryLedger::new();
        ledger.post("first").await.unwrap();
        ledger.post("second").await.unwrap();

        assert_eq!(ledger.transcript(), vec!["first", "second"]);
    }
}
