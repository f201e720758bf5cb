//! Outcome strategies
//!
//! Each strategy turns one roll and a wager into a [`GambleResult`]. The
//! roller is passed in on every call, so a strategy value holds only its
//! configuration and can be shared freely.

use crate::games::range::{RangePartition, WinRangeKind};
use crate::games::roller::Roller;
use crate::games::types::{floor_scaled, GambleResult, GambleResultKind};
use serde::{Deserialize, Serialize};

/// Highest roll of the percentage mode
pub const PERCENTAGE_MAX_ROLL: i64 = 100;

/// Roll that neither wins nor loses in the percentage mode
pub const PERCENTAGE_NEUTRAL_ROLL: i64 = 50;

/// Parameters of the threshold mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// Inclusive upper bound of the roll, the lower bound is 0
    pub max_roll: i64,
    /// Rolls above win, rolls below lose, the threshold itself is neutral
    pub threshold: i64,
    pub jackpot_target: i64,
    /// Multiplier applied to the wager on a win
    pub win_points_factor: f64,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            max_roll: 100,
            threshold: 50,
            jackpot_target: 100,
            win_points_factor: 1.0,
        }
    }
}

/// The selectable outcome strategies
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Roll 0..=100, payout scales linearly with the distance from 50
    PercentageLinear,
    Threshold(ThresholdParams),
    Ranges(RangePartition),
}

impl Strategy {
    /// Rolls once and classifies the outcome for `wager`.
    pub fn winnings<R: Roller + ?Sized>(
        &self,
        roller: &R,
        wager: i64,
        jackpot_enabled: bool,
    ) -> GambleResult {
        match self {
            Strategy::PercentageLinear => percentage_linear(roller, wager, jackpot_enabled),
            Strategy::Threshold(params) => threshold(params, roller, wager, jackpot_enabled),
            Strategy::Ranges(partition) => ranges(partition, roller, wager, jackpot_enabled),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::PercentageLinear => "Percentage Linear",
            Strategy::Threshold(_) => "Threshold",
            Strategy::Ranges(_) => "Ranges",
        }
    }
}

fn percentage_linear<R: Roller + ?Sized>(
    roller: &R,
    wager: i64,
    jackpot_enabled: bool,
) -> GambleResult {
    let roll = roller.rand_int_inclusive(0, PERCENTAGE_MAX_ROLL);

    match roll {
        PERCENTAGE_NEUTRAL_ROLL => GambleResult::without_amount(GambleResultKind::Neutral, roll),
        PERCENTAGE_MAX_ROLL if jackpot_enabled => {
            GambleResult::without_amount(GambleResultKind::Jackpot, roll)
        }
        PERCENTAGE_MAX_ROLL => GambleResult::new(GambleResultKind::Won, roll, wager),
        0 => GambleResult::new(GambleResultKind::Lost, roll, wager),
        _ => {
            let kind = if roll > PERCENTAGE_NEUTRAL_ROLL {
                GambleResultKind::Won
            } else {
                GambleResultKind::Lost
            };
            // |50 - roll| * 2% of the wager, floored in integer space
            let distance = i128::from((PERCENTAGE_NEUTRAL_ROLL - roll).abs());
            let amount = distance * 2 * i128::from(wager) / 100;
            let amount = i64::try_from(amount).unwrap_or(wager);
            GambleResult::new(kind, roll, amount)
        }
    }
}

fn threshold<R: Roller + ?Sized>(
    params: &ThresholdParams,
    roller: &R,
    wager: i64,
    jackpot_enabled: bool,
) -> GambleResult {
    let roll = roller.rand_int_inclusive(0, params.max_roll);

    if jackpot_enabled && roll == params.jackpot_target {
        return GambleResult::without_amount(GambleResultKind::Jackpot, roll);
    }

    if roll == params.threshold {
        GambleResult::without_amount(GambleResultKind::Neutral, roll)
    } else if roll > params.threshold {
        let amount = floor_scaled(wager, params.win_points_factor);
        GambleResult::new(GambleResultKind::Won, roll, amount)
    } else {
        GambleResult::new(GambleResultKind::Lost, roll, wager)
    }
}

fn ranges<R: Roller + ?Sized>(
    partition: &RangePartition,
    roller: &R,
    wager: i64,
    jackpot_enabled: bool,
) -> GambleResult {
    let roll = roller.rand_int_inclusive(partition.min(), partition.max());

    // Only an out-of-bounds roller can miss; treat that as a push.
    let Some(range) = partition.matching(roll) else {
        tracing::warn!("Roll {} outside of configured ranges", roll);
        return GambleResult::without_amount(GambleResultKind::Neutral, roll);
    };

    match range.kind {
        WinRangeKind::Jackpot if jackpot_enabled => {
            GambleResult::without_amount(GambleResultKind::Jackpot, roll)
        }
        WinRangeKind::Jackpot => GambleResult::without_amount(GambleResultKind::Neutral, roll),
        WinRangeKind::Regular { multiplier } => {
            let amount = floor_scaled(wager, multiplier.abs());
            if multiplier == 0.0 {
                GambleResult::without_amount(GambleResultKind::Neutral, roll)
            } else if multiplier > 0.0 {
                GambleResult::new(GambleResultKind::Won, roll, amount)
            } else {
                GambleResult::new(GambleResultKind::Lost, roll, amount)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::range::{NumericRange, WinRange};
    use crate::games::roller::{FixedRoller, SeededRoller};

    fn roll_percentage(roll: i64, wager: i64, jackpot_enabled: bool) -> GambleResult {
        Strategy::PercentageLinear.winnings(&FixedRoller::constant(roll), wager, jackpot_enabled)
    }

    fn threshold_strategy() -> Strategy {
        Strategy::Threshold(ThresholdParams {
            max_roll: 100,
            threshold: 60,
            jackpot_target: 70,
            win_points_factor: 3.0,
        })
    }

    fn ranges_strategy() -> Strategy {
        let partition = RangePartition::build(vec![
            WinRange::regular(NumericRange::new(0, 49), -1.0),
            WinRange::regular(NumericRange::new(50, 50), 0.0),
            WinRange::regular(NumericRange::new(51, 99), 3.0),
            WinRange::jackpot(NumericRange::new(100, 100)),
        ])
        .expect("valid partition");
        Strategy::Ranges(partition)
    }

    #[test]
    fn test_percentage_boundaries() {
        let lost = roll_percentage(0, 1000, true);
        assert_eq!(lost.kind(), GambleResultKind::Lost);
        assert_eq!(lost.amount(), 1000);

        let neutral = roll_percentage(50, 1000, true);
        assert_eq!(neutral.kind(), GambleResultKind::Neutral);
        assert_eq!(neutral.amount(), 0);

        let jackpot = roll_percentage(100, 1000, true);
        assert_eq!(jackpot.kind(), GambleResultKind::Jackpot);

        let full_win = roll_percentage(100, 1000, false);
        assert_eq!(full_win.kind(), GambleResultKind::Won);
        assert_eq!(full_win.amount(), 1000);
    }

    #[test]
    fn test_percentage_linear_scale() {
        let won = roll_percentage(99, 1000, true);
        assert_eq!(won.kind(), GambleResultKind::Won);
        assert_eq!(won.amount(), 980);

        let lost = roll_percentage(1, 1000, true);
        assert_eq!(lost.kind(), GambleResultKind::Lost);
        assert_eq!(lost.amount(), 980);

        let small = roll_percentage(51, 33, true);
        assert_eq!(small.kind(), GambleResultKind::Won);
        assert_eq!(small.amount(), 0);

        let mid = roll_percentage(75, 333, true);
        assert_eq!(mid.amount(), 166);
    }

    #[test]
    fn test_percentage_rolls_stay_in_bounds() {
        let roller = SeededRoller::new(7);
        for _ in 0..1_000 {
            let result = Strategy::PercentageLinear.winnings(&roller, 100, true);
            assert!((0..=100).contains(&result.roll()));
            assert!(result.amount() <= 100);
        }
    }

    #[test]
    fn test_threshold_boundaries() {
        let strategy = threshold_strategy();

        let jackpot = strategy.winnings(&FixedRoller::constant(70), 200, true);
        assert_eq!(jackpot.kind(), GambleResultKind::Jackpot);

        let won_on_target = strategy.winnings(&FixedRoller::constant(70), 200, false);
        assert_eq!(won_on_target.kind(), GambleResultKind::Won);
        assert_eq!(won_on_target.amount(), 600);

        let neutral = strategy.winnings(&FixedRoller::constant(60), 200, true);
        assert_eq!(neutral.kind(), GambleResultKind::Neutral);

        let won = strategy.winnings(&FixedRoller::constant(80), 200, true);
        assert_eq!(won.kind(), GambleResultKind::Won);
        assert_eq!(won.amount(), 600);

        let lost = strategy.winnings(&FixedRoller::constant(30), 200, true);
        assert_eq!(lost.kind(), GambleResultKind::Lost);
        assert_eq!(lost.amount(), 200);
    }

    #[test]
    fn test_threshold_jackpot_on_threshold() {
        let strategy = Strategy::Threshold(ThresholdParams {
            max_roll: 100,
            threshold: 60,
            jackpot_target: 60,
            win_points_factor: 2.0,
        });

        let enabled = strategy.winnings(&FixedRoller::constant(60), 100, true);
        assert_eq!(enabled.kind(), GambleResultKind::Jackpot);

        let disabled = strategy.winnings(&FixedRoller::constant(60), 100, false);
        assert_eq!(disabled.kind(), GambleResultKind::Neutral);
    }

    #[test]
    fn test_threshold_fractional_factor_is_floored() {
        let strategy = Strategy::Threshold(ThresholdParams {
            win_points_factor: 1.5,
            ..ThresholdParams::default()
        });

        let won = strategy.winnings(&FixedRoller::constant(99), 101, false);
        assert_eq!(won.amount(), 151);
    }

    #[test]
    fn test_ranges_resolution() {
        let strategy = ranges_strategy();

        let jackpot = strategy.winnings(&FixedRoller::constant(100), 200, true);
        assert_eq!(jackpot.kind(), GambleResultKind::Jackpot);

        let neutral = strategy.winnings(&FixedRoller::constant(50), 200, true);
        assert_eq!(neutral.kind(), GambleResultKind::Neutral);

        let lost = strategy.winnings(&FixedRoller::constant(40), 200, true);
        assert_eq!(lost.kind(), GambleResultKind::Lost);
        assert_eq!(lost.amount(), 200);

        let won = strategy.winnings(&FixedRoller::constant(90), 200, true);
        assert_eq!(won.kind(), GambleResultKind::Won);
        assert_eq!(won.amount(), 600);
    }

    #[test]
    fn test_ranges_jackpot_disabled_is_neutral() {
        let result = ranges_strategy().winnings(&FixedRoller::constant(100), 200, false);
        assert_eq!(result.kind(), GambleResultKind::Neutral);
        assert_eq!(result.amount(), 0);
    }

    #[test]
    fn test_large_wagers_keep_exact_amounts() {
        let wager = 9_007_199_254_740_993;

        let lost = roll_percentage(0, wager, true);
        assert_eq!(lost.amount(), wager);

        let won = roll_percentage(100, wager, false);
        assert_eq!(won.amount(), wager);

        let params = ThresholdParams {
            win_points_factor: 1.0,
            ..ThresholdParams::default()
        };
        let threshold = Strategy::Threshold(params);
        assert_eq!(threshold.winnings(&FixedRoller::constant(10), wager, false).amount(), wager);
        assert_eq!(threshold.winnings(&FixedRoller::constant(90), wager, false).amount(), wager);

        let ranges = ranges_strategy();
        assert_eq!(ranges.winnings(&FixedRoller::constant(10), wager, true).amount(), wager);
        assert_eq!(ranges.winnings(&FixedRoller::constant(90), wager, true).amount(), wager * 3);
    }

    #[test]
    fn test_winnings_are_deterministic_for_fixed_roll() {
        let strategy = threshold_strategy();
        let first = strategy.winnings(&FixedRoller::constant(85), 250, true);
        let second = strategy.winnings(&FixedRoller::constant(85), 250, true);
        assert_eq!(first, second);
    }
}
