//! Chatgamble - Chat Currency Gambling Engine
//!
//! Resolves a chat user's wager into win, loss, push or jackpot under one of
//! three strategies (percentage linear, threshold, numeric ranges) and emits
//! the currency, counter and chat effects that settle it.
//!
//! The engine in [`games`] is pure: randomness comes from an injected
//! [`Roller`] and stores are reached only through the collaborator traits in
//! [`common::traits`], driven by [`services::GambleService`].

pub mod common;
pub mod errors;
pub mod games;
pub mod memory;
pub mod services;

pub use common::config::{AppConfig, ConfigBuilder, ConfigLoader, GambleMode, GambleSettings};
pub use errors::{EngineError, EngineResult};
pub use games::{
    EffectInstruction, GambleHandler, GambleResult, GambleResultKind, Roller, SeededRoller,
    Strategy, ThreadRngRoller, WagerEntry,
};
pub use memory::InMemoryLedger;
pub use services::{CommandTrigger, EffectExecutor, GambleService, TriggerKind};
