//! Collaborator interfaces
//!
//! The engine itself performs no I/O. Balances, counters and chat live
//! behind these traits and are reached only by the service layer.

use crate::errors::EngineResult;
use crate::games::effects::CounterUpdateMode;
use async_trait::async_trait;

/// User currency balances
#[async_trait]
pub trait CurrencyStore: Send + Sync {
    /// Balance of `user` in `currency_id`, `None` if the currency is unknown
    async fn balance(&self, user: &str, currency_id: &str) -> EngineResult<Option<i64>>;

    /// Add `signed_amount` (negative removes) to the user's balance
    async fn adjust(&self, user: &str, currency_id: &str, signed_amount: i64) -> EngineResult<()>;
}

/// Named integer counters, the jackpot pool among them
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current value, `None` if no such counter exists
    async fn value(&self, counter_id: &str) -> EngineResult<Option<i64>>;

    async fn update(
        &self,
        counter_id: &str,
        mode: CounterUpdateMode,
        value: i64,
    ) -> EngineResult<()>;
}

/// Chat channel the command came from
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn post(&self, text: &str) -> EngineResult<()>;
}
