//! Chat message templates
//!
//! Placeholders filled by the engine: `%roll`, `%amount`, `%newTotal` and,
//! for the below-minimum message, `%min`. Each placeholder is replaced once
//! (its first occurrence). `$`-variables such as `$user` are left for the
//! chat host to expand.

use crate::games::types::{GambleResult, GambleResultKind, WagerEntry};
use serde::{Deserialize, Serialize};

/// Message templates posted after a gamble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub won: String,
    pub lost: String,
    pub jackpot_won: String,
    pub entry_below_minimum: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            jackpot_won: concat!(
                "Rolled %roll. $user won the jackpot of %amount points ",
                "and now has a total of %newTotal."
            )
            .to_string(),
            lost: "Rolled %roll. $user lost %amount points and now has a total of %newTotal."
                .to_string(),
            won: "Rolled %roll. $user won %amount points and now has a total of %newTotal."
                .to_string(),
            entry_below_minimum: "@$user You cannot gamble fewer than %min points.".to_string(),
        }
    }
}

impl MessageTemplates {
    /// Template used for a result kind. Neutral results share the won message.
    pub fn for_kind(&self, kind: GambleResultKind) -> &str {
        match kind {
            GambleResultKind::Won | GambleResultKind::Neutral => &self.won,
            GambleResultKind::Lost => &self.lost,
            GambleResultKind::Jackpot => &self.jackpot_won,
        }
    }

    /// Fills the result template for `result`.
    pub fn render_result(
        &self,
        entry: &WagerEntry,
        result: &GambleResult,
        jackpot_value: i64,
    ) -> String {
        fill_result_placeholders(self.for_kind(result.kind()), entry, result, jackpot_value)
    }

    pub fn render_below_minimum(&self, minimum: i64) -> String {
        self.entry_below_minimum.replacen("%min", &minimum.to_string(), 1)
    }
}

/// Replaces `%roll`, `%amount` and `%newTotal` in `template`.
pub fn fill_result_placeholders(
    template: &str,
    entry: &WagerEntry,
    result: &GambleResult,
    jackpot_value: i64,
) -> String {
    let amount = match result.kind() {
        GambleResultKind::Jackpot => jackpot_value,
        _ => result.amount(),
    };
    let sign = match result.kind() {
        GambleResultKind::Won | GambleResultKind::Jackpot => 1,
        GambleResultKind::Lost | GambleResultKind::Neutral => -1,
    };
    let new_total = entry.total_balance.saturating_add(amount.saturating_mul(sign));

    template
        .replacen("%roll", &result.roll().to_string(), 1)
        .replacen("%amount", &amount.to_string(), 1)
        .replacen("%newTotal", &new_total.to_string(), 1)
}
