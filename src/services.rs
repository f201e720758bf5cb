//! Service layer wiring the gamble handler to its collaborators
//!
//! [`GambleService`] turns a chat command into effect instructions and
//! [`EffectExecutor`] applies them against the stores.

use crate::{
    common::traits::{ChatSink, CounterStore, CurrencyStore},
    errors::{EngineError, EngineResult, EntryError},
    games::{
        effects::{CurrencyAction, EffectInstruction},
        entry::entered_points,
        processor::GambleHandler,
        types::WagerEntry,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What fired the effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    Command,
    Other,
}

/// A chat command invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTrigger {
    pub kind: TriggerKind,
    pub username: String,
    pub args: Vec<String>,
}

impl CommandTrigger {
    pub fn command<I, S>(username: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: TriggerKind::Command,
            username: username.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Returns the single wager argument of a valid trigger
pub fn validate_trigger(trigger: &CommandTrigger) -> Result<&str, EntryError> {
    if trigger.kind != TriggerKind::Command {
        return Err(EntryError::NotACommand);
    }

    match trigger.args.as_slice() {
        [arg] => Ok(arg.as_str()),
        args => Err(EntryError::InvalidArgumentCount(args.len())),
    }
}

/// Applies effect instructions to the stores in order
#[derive(Clone)]
pub struct EffectExecutor {
    currency: Arc<dyn CurrencyStore>,
    counters: Arc<dyn CounterStore>,
    chat: Arc<dyn ChatSink>,
}

impl EffectExecutor {
    pub fn new(
        currency: Arc<dyn CurrencyStore>,
        counters: Arc<dyn CounterStore>,
        chat: Arc<dyn ChatSink>,
    ) -> Self {
        Self {
            currency,
            counters,
            chat,
        }
    }

    /// Applies `effects` one after another and stops at the first failure.
    pub async fn apply(&self, effects: &[EffectInstruction]) -> EngineResult<()> {
        for effect in effects {
            tracing::debug!("Applying {}", effect);
            match effect {
                EffectInstruction::CurrencyAdjust {
                    currency_id,
                    action,
                    user,
                    amount,
                } => {
                    let delta = match action {
                        CurrencyAction::Add => *amount,
                        CurrencyAction::Remove => -*amount,
                    };
                    self.currency.adjust(user, currency_id, delta).await?;
                }
                EffectInstruction::CounterUpdate {
                    counter_id,
                    mode,
                    value,
                } => {
                    self.counters.update(counter_id, *mode, *value).await?;
                }
                EffectInstruction::ChatMessage { text } => {
                    self.chat.post(text).await?;
                }
            }
        }
        Ok(())
    }
}

/// Runs the gamble command against live collaborators
pub struct GambleService {
    handler: GambleHandler,
    currency: Arc<dyn CurrencyStore>,
    counters: Arc<dyn CounterStore>,
    executor: EffectExecutor,
}

impl GambleService {
    pub fn new(
        handler: GambleHandler,
        currency: Arc<dyn CurrencyStore>,
        counters: Arc<dyn CounterStore>,
        chat: Arc<dyn ChatSink>,
    ) -> Self {
        let executor = EffectExecutor::new(Arc::clone(&currency), Arc::clone(&counters), chat);
        Self {
            handler,
            currency,
            counters,
            executor,
        }
    }

    /// Service backed by one object serving all three collaborator roles
    pub fn with_ledger<L>(handler: GambleHandler, ledger: Arc<L>) -> Self
    where
        L: CurrencyStore + CounterStore + ChatSink + 'static,
    {
        Self::new(handler, ledger.clone(), ledger.clone(), ledger)
    }

    pub fn handler(&self) -> &GambleHandler {
        &self.handler
    }

    pub fn executor(&self) -> &EffectExecutor {
        &self.executor
    }

    /// Validates the trigger and the wager against the user's balance.
    ///
    /// Rejections come back as [`EngineError::Entry`]; store failures pass
    /// through unchanged.
    pub async fn prepare_entry(&self, trigger: &CommandTrigger) -> EngineResult<WagerEntry> {
        let arg = validate_trigger(trigger)?;
        let currency_id = self.handler.currency_id();

        let balance = self
            .currency
            .balance(&trigger.username, currency_id)
            .await?
            .ok_or_else(|| EntryError::BalanceUnavailable {
                user: trigger.username.clone(),
                currency_id: currency_id.to_string(),
            })?;

        let wagered = entered_points(balance, arg)
            .ok_or_else(|| EntryError::Unparseable(arg.to_string()))?;

        if wagered > balance {
            return Err(EntryError::InsufficientBalance { wagered, balance }.into());
        }

        let minimum = self.handler.minimum_entry();
        if wagered < minimum {
            return Err(EntryError::BelowMinimum { wagered, minimum }.into());
        }

        Ok(WagerEntry::new(trigger.username.clone(), balance, wagered))
    }

    /// Resolves a trigger into the effects to apply, without applying them.
    pub async fn resolve(&self, trigger: &CommandTrigger) -> EngineResult<Vec<EffectInstruction>> {
        let entry = match self.prepare_entry(trigger).await {
            Ok(entry) => entry,
            Err(EngineError::Entry(EntryError::BelowMinimum { minimum, .. })) => {
                let message = self.handler.messages().render_below_minimum(minimum);
                tracing::debug!("Entry below minimum, replying: {}", message);
                return Ok(vec![EffectInstruction::chat(message)]);
            }
            Err(EngineError::Entry(reason)) => {
                log_rejection(&reason);
                return Ok(Vec::new());
            }
            Err(other) => return Err(other),
        };

        let counter_id = self.handler.jackpot_counter_id();
        let Some(jackpot_value) = self.counters.value(counter_id).await? else {
            tracing::error!("Cannot retrieve jackpot counter with ID {}", counter_id);
            return Ok(Vec::new());
        };
        tracing::info!("Current jackpot: {}", jackpot_value);

        Ok(self.handler.handle(&entry, jackpot_value))
    }

    /// Resolves a trigger and applies the resulting effects.
    pub async fn run(&self, trigger: &CommandTrigger) -> EngineResult<Vec<EffectInstruction>> {
        let effects = self.resolve(trigger).await?;
        self.executor.apply(&effects).await?;
        Ok(effects)
    }
}

fn log_rejection(reason: &EntryError) {
    match reason {
        EntryError::NotACommand => tracing::debug!("{}", reason),
        EntryError::BalanceUnavailable { .. } => tracing::error!("{}", reason),
        EntryError::InvalidArgumentCount(_)
        | EntryError::Unparseable(_)
        | EntryError::InsufficientBalance { .. }
        | EntryError::BelowMinimum { .. } => tracing::info!("{}", reason),
    }
}
