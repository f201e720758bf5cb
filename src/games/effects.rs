use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a currency change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyAction {
    Add,
    Remove,
}

impl fmt::Display for CurrencyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyAction::Add => write!(f, "add"),
            CurrencyAction::Remove => write!(f, "remove"),
        }
    }
}

/// How a counter value is applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CounterUpdateMode {
    Increment,
    Set,
}

impl fmt::Display for CounterUpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterUpdateMode::Increment => write!(f, "increment"),
            CounterUpdateMode::Set => write!(f, "set"),
        }
    }
}

/// Unexecuted side effect produced by resolving a gamble.
///
/// Instructions are meant to be applied in the order they are returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EffectInstruction {
    ChatMessage {
        text: String,
    },
    CurrencyAdjust {
        currency_id: String,
        action: CurrencyAction,
        user: String,
        amount: i64,
    },
    CounterUpdate {
        counter_id: String,
        mode: CounterUpdateMode,
        value: i64,
    },
}

impl EffectInstruction {
    pub fn chat(text: impl Into<String>) -> Self {
        EffectInstruction::ChatMessage { text: text.into() }
    }

    pub fn currency(currency_id: &str, action: CurrencyAction, user: &str, amount: i64) -> Self {
        EffectInstruction::CurrencyAdjust {
            currency_id: currency_id.to_string(),
            action,
            user: user.to_string(),
            amount,
        }
    }

    pub fn counter(counter_id: &str, mode: CounterUpdateMode, value: i64) -> Self {
        EffectInstruction::CounterUpdate {
            counter_id: counter_id.to_string(),
            mode,
            value,
        }
    }

    /// Signed currency delta, `None` for other variants
    pub fn signed_amount(&self) -> Option<i64> {
        match self {
            EffectInstruction::CurrencyAdjust { action, amount, .. } => match action {
                CurrencyAction::Add => Some(*amount),
                CurrencyAction::Remove => Some(-*amount),
            },
            _ => None,
        }
    }
}

impl fmt::Display for EffectInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectInstruction::ChatMessage { text } => {
                write!(f, "ChatMessage {{ text: {} }}", text)
            }
            EffectInstruction::CurrencyAdjust {
                currency_id,
                action,
                user,
                amount,
            } => write!(
                f,
                "CurrencyAdjust {{ currency: {}, action: {}, user: {}, amount: {} }}",
                currency_id, action, user, amount
            ),
            EffectInstruction::CounterUpdate {
                counter_id,
                mode,
                value,
            } => write!(
                f,
                "CounterUpdate {{ counter: {}, mode: {}, value: {} }}",
                counter_id, mode, value
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let add = EffectInstruction::currency("points", CurrencyAction::Add, "alice", 40);
        let remove = EffectInstruction::currency("points", CurrencyAction::Remove, "alice", 40);

        assert_eq!(add.signed_amount(), Some(40));
        assert_eq!(remove.signed_amount(), Some(-40));
        assert_eq!(EffectInstruction::chat("hi").signed_amount(), None);
    }

    #[test]
    fn test_serialized_shape() {
        let effect = EffectInstruction::counter("jackpot", CounterUpdateMode::Increment, 60);
        let json = serde_json::to_value(&effect).expect("serializes");

        assert_eq!(json["effect"], "counter_update");
        assert_eq!(json["mode"], "increment");
        assert_eq!(json["value"], 60);
    }
}
