pub mod types;
pub mod roller;
pub mod range;
pub mod strategy;
pub mod effects;
pub mod messages;
pub mod entry;
pub mod processor;

pub use types::*;
pub use roller::{FixedRoller, Roller, SeededRoller, ThreadRngRoller};
pub use range::{
    validate_ranges, NumericRange, RangePartition, RangeSpec, RangeType, WinRange, WinRangeKind,
};
pub use strategy::{Strategy, ThresholdParams};
pub use effects::{CounterUpdateMode, CurrencyAction, EffectInstruction};
pub use messages::MessageTemplates;
pub use entry::entered_points;
pub use processor::GambleHandler;
