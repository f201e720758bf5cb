use crate::common::config::GambleSettings;
use crate::errors::EngineResult;
use crate::games::effects::{CounterUpdateMode, CurrencyAction, EffectInstruction};
use crate::games::messages::MessageTemplates;
use crate::games::roller::Roller;
use crate::games::strategy::Strategy;
use crate::games::types::{floor_scaled, GambleResult, GambleResultKind, WagerEntry};
use std::sync::Arc;

/// Resolves validated wagers into effect instructions
pub struct GambleHandler {
    strategy: Strategy,
    roller: Arc<dyn Roller>,
    currency_id: String,
    jackpot_counter_id: String,
    minimum_entry: i64,
    /// Share of a loss added to the jackpot, in `[0, 1]`
    jackpot_fraction: f64,
    jackpot_enabled: bool,
    messages: MessageTemplates,
}

impl GambleHandler {
    /// Create a handler for an already built strategy.
    ///
    /// A jackpot percent of zero or below disables the jackpot for every
    /// strategy.
    pub fn new(strategy: Strategy, roller: Arc<dyn Roller>, settings: &GambleSettings) -> Self {
        let (jackpot_fraction, jackpot_enabled) = if settings.jackpot_percent <= 0.0 {
            (0.0, false)
        } else {
            (settings.jackpot_percent / 100.0, true)
        };

        Self {
            strategy,
            roller,
            currency_id: settings.currency_id.clone(),
            jackpot_counter_id: settings.jackpot_counter_id.clone(),
            minimum_entry: settings.minimum_entry,
            jackpot_fraction,
            jackpot_enabled,
            messages: settings.messages.clone(),
        }
    }

    /// Build the strategy selected in `settings` and wrap it in a handler
    pub fn from_settings(settings: &GambleSettings, roller: Arc<dyn Roller>) -> EngineResult<Self> {
        let strategy = settings.strategy()?;
        Ok(Self::new(strategy, roller, settings))
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn minimum_entry(&self) -> i64 {
        self.minimum_entry
    }

    pub fn jackpot_enabled(&self) -> bool {
        self.jackpot_enabled
    }

    pub fn currency_id(&self) -> &str {
        &self.currency_id
    }

    pub fn jackpot_counter_id(&self) -> &str {
        &self.jackpot_counter_id
    }

    pub fn messages(&self) -> &MessageTemplates {
        &self.messages
    }

    /// Rolls for `entry` and returns the effects in application order.
    ///
    /// Minimum and balance checks are the caller's job.
    pub fn handle(&self, entry: &WagerEntry, jackpot_value: i64) -> Vec<EffectInstruction> {
        let result = self
            .strategy
            .winnings(self.roller.as_ref(), entry.wagered, self.jackpot_enabled);
        tracing::info!("{}", result);

        self.result_effects(entry, &result, jackpot_value)
    }

    /// Effects for an already classified result
    pub fn result_effects(
        &self,
        entry: &WagerEntry,
        result: &GambleResult,
        jackpot_value: i64,
    ) -> Vec<EffectInstruction> {
        let mut effects = Vec::with_capacity(3);

        match result.kind() {
            GambleResultKind::Won => {
                effects.push(EffectInstruction::currency(
                    &self.currency_id,
                    CurrencyAction::Add,
                    &entry.user,
                    result.amount(),
                ));
            }
            // Nothing to pay, only the message
            GambleResultKind::Neutral => {}
            GambleResultKind::Lost => {
                effects.push(EffectInstruction::currency(
                    &self.currency_id,
                    CurrencyAction::Remove,
                    &entry.user,
                    result.amount(),
                ));

                let jackpot_add = floor_scaled(result.amount(), self.jackpot_fraction);
                if jackpot_add > 0 {
                    effects.push(EffectInstruction::counter(
                        &self.jackpot_counter_id,
                        CounterUpdateMode::Increment,
                        jackpot_add,
                    ));
                }
            }
            GambleResultKind::Jackpot => {
                effects.push(EffectInstruction::currency(
                    &self.currency_id,
                    CurrencyAction::Add,
                    &entry.user,
                    jackpot_value,
                ));
                effects.push(EffectInstruction::counter(
                    &self.jackpot_counter_id,
                    CounterUpdateMode::Set,
                    0,
                ));
            }
        }

        let message = self.messages.render_result(entry, result, jackpot_value);
        effects.push(EffectInstruction::chat(message));

        effects
    }
}
