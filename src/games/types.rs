use serde::{Deserialize, Serialize};
use std::fmt;

/// A single user's wager, built per command and discarded after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerEntry {
    pub user: String,
    /// Balance before the gamble
    pub total_balance: i64,
    pub wagered: i64,
}

impl WagerEntry {
    pub fn new(user: impl Into<String>, total_balance: i64, wagered: i64) -> Self {
        Self {
            user: user.into(),
            total_balance,
            wagered,
        }
    }
}

/// Classification of a roll
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GambleResultKind {
    Won,
    Lost,
    Neutral,
    Jackpot,
}

impl fmt::Display for GambleResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GambleResultKind::Won => write!(f, "Won"),
            GambleResultKind::Lost => write!(f, "Lost"),
            GambleResultKind::Neutral => write!(f, "Neutral"),
            GambleResultKind::Jackpot => write!(f, "Jackpot"),
        }
    }
}

/// `floor(value * factor)`, exact for whole factors.
///
/// Fractional factors go through `f64`; results saturate at the `i64` bounds.
pub fn floor_scaled(value: i64, factor: f64) -> i64 {
    if factor.fract() == 0.0 && factor.abs() < i64::MAX as f64 {
        let product = i128::from(value) * i128::from(factor as i64);
        return i64::try_from(product).unwrap_or(if product < 0 { i64::MIN } else { i64::MAX });
    }
    (value as f64 * factor).floor() as i64
}

/// Outcome of one roll.
///
/// `amount` is always zero for neutral and jackpot results; the jackpot
/// payout is read from the live counter, not carried here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GambleResult {
    kind: GambleResultKind,
    roll: i64,
    amount: i64,
}

impl GambleResult {
    /// Builds a result, zeroing `amount` where the kind carries none.
    pub fn new(kind: GambleResultKind, roll: i64, amount: i64) -> Self {
        let amount = match kind {
            GambleResultKind::Neutral | GambleResultKind::Jackpot => 0,
            GambleResultKind::Won | GambleResultKind::Lost => amount.max(0),
        };

        Self { kind, roll, amount }
    }

    /// Result without an amount (neutral, jackpot)
    pub fn without_amount(kind: GambleResultKind, roll: i64) -> Self {
        Self::new(kind, roll, 0)
    }

    pub fn kind(&self) -> GambleResultKind {
        self.kind
    }

    pub fn roll(&self) -> i64 {
        self.roll
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl fmt::Display for GambleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GambleResult {{ kind: {}, roll: {}, amount: {} }}",
            self.kind, self.roll, self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_scaled() {
        assert_eq!(floor_scaled(400, 1.4999), 599);
        assert_eq!(floor_scaled(101, 1.5), 151);
        assert_eq!(floor_scaled(-3, 0.5), -2);
        assert_eq!(floor_scaled(9_007_199_254_740_993, 1.0), 9_007_199_254_740_993);
        assert_eq!(floor_scaled(9_007_199_254_740_993, 2.0), 18_014_398_509_481_986);
        assert_eq!(floor_scaled(i64::MAX, 3.0), i64::MAX);
    }

    #[test]
    fn test_negative_amount_is_clamped() {
        let result = GambleResult::new(GambleResultKind::Won, 70, -5);
        assert_eq!(result.amount(), 0);
    }

    #[test]
    fn test_neutral_and_jackpot_drop_amount() {
        let neutral = GambleResult::new(GambleResultKind::Neutral, 50, 300);
        let jackpot = GambleResult::new(GambleResultKind::Jackpot, 100, 300);

        assert_eq!(neutral.amount(), 0);
        assert_eq!(jackpot.amount(), 0);
        assert_eq!(jackpot.roll(), 100);
    }

    #[test]
    fn test_display() {
        let result = GambleResult::new(GambleResultKind::Lost, 12, 200);
        assert_eq!(
            result.to_string(),
            "GambleResult { kind: Lost, roll: 12, amount: 200 }"
        );
    }
}
