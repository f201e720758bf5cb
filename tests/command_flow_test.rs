//! End-to-end command flow: TOML settings, service, in-memory ledger
//! This drives several chat commands through one session and checks the
//! balances, jackpot counter and chat replies left behind.

use chatgamble::{
    common::config::{ConfigLoader, GambleMode},
    errors::{ConfigurationError, EngineError},
    games::{FixedRoller, GambleHandler},
    memory::InMemoryLedger,
    services::{CommandTrigger, GambleService},
};
use std::{io::Write, sync::Arc};
use tempfile::NamedTempFile;

const RANGES_CONFIG: &str = r#"
[gamble]
currency_id = "coins"
jackpot_counter_id = "pot"
minimum_entry = 10
jackpot_percent = 50.0
mode = "Ranges"
ranges = [
    { from = 0, to = 49, mult = -1.0, range_type = "Normal" },
    { from = 50, to = 50, mult = 0.0, range_type = "Normal" },
    { from = 51, to = 99, mult = 2.0, range_type = "Normal" },
    { from = 100, to = 100, range_type = "Jackpot" },
]

[logging]
level = "debug"
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write config");
    file
}

#[tokio::test]
async fn test_ranges_session_from_config_file() {
    let file = write_config(RANGES_CONFIG);
    let config = ConfigLoader::new()
        .with_path(file.path())
        .load()
        .expect("Failed to load config");
    assert_eq!(config.gamble.mode, GambleMode::Ranges);

    let roller = Arc::new(FixedRoller::new(vec![20, 75, 100]));
    let handler =
        GambleHandler::from_settings(&config.gamble, roller).expect("Failed to build handler");

    let ledger = Arc::new(
        InMemoryLedger::new()
            .with_balance("alice", "coins", 1000)
            .with_counter("pot", 0),
    );
    let service = GambleService::with_ledger(handler, Arc::clone(&ledger));

    // Roll 20: lose the wager, half of it feeds the pot
    service.run(&CommandTrigger::command("alice", ["100"])).await.unwrap();
    assert_eq!(ledger.balance_of("alice", "coins"), Some(900));
    assert_eq!(ledger.counter_of("pot"), Some(50));

    // Roll 75: 450 at multiplier 2
    service.run(&CommandTrigger::command("alice", ["50%"])).await.unwrap();
    assert_eq!(ledger.balance_of("alice", "coins"), Some(1800));
    assert_eq!(ledger.counter_of("pot"), Some(50));

    // Roll 100: jackpot pays the pot and empties it
    service.run(&CommandTrigger::command("alice", ["all"])).await.unwrap();
    assert_eq!(ledger.balance_of("alice", "coins"), Some(1850));
    assert_eq!(ledger.counter_of("pot"), Some(0));

    // Below the minimum: only a reply
    service.run(&CommandTrigger::command("alice", ["5"])).await.unwrap();
    assert_eq!(ledger.balance_of("alice", "coins"), Some(1850));

    assert_eq!(
        ledger.transcript(),
        vec![
            "Rolled 20. $user lost 100 points and now has a total of 900.",
            "Rolled 75. $user won 900 points and now has a total of 1800.",
            "Rolled 100. $user won the jackpot of 50 points and now has a total of 1850.",
            "@$user You cannot gamble fewer than 10 points.",
        ]
    );
}

#[tokio::test]
async fn test_rejected_commands_leave_ledger_untouched() {
    let file = write_config(RANGES_CONFIG);
    let config = ConfigLoader::new().with_path(file.path()).load().unwrap();
    let handler =
        GambleHandler::from_settings(&config.gamble, Arc::new(FixedRoller::constant(20))).unwrap();

    let ledger = Arc::new(
        InMemoryLedger::new()
            .with_balance("bob", "coins", 300)
            .with_counter("pot", 75),
    );
    let service = GambleService::with_ledger(handler, Arc::clone(&ledger));

    for args in [vec!["301"], vec!["lots"], vec!["0%"], vec!["100", "extra"]] {
        let effects = service.run(&CommandTrigger::command("bob", args)).await.unwrap();
        assert!(effects.is_empty());
    }

    assert_eq!(ledger.balance_of("bob", "coins"), Some(300));
    assert_eq!(ledger.counter_of("pot"), Some(75));
    assert!(ledger.transcript().is_empty());
}

#[tokio::test]
async fn test_invalid_ranges_are_rejected_on_load() {
    let file = write_config(
        r#"
[gamble]
mode = "Ranges"
ranges = [
    { from = 0, to = 40, mult = -1.0, range_type = "Normal" },
    { from = 45, to = 100, mult = 1.0, range_type = "Normal" },
]
"#,
    );

    let result = ConfigLoader::new().with_path(file.path()).load();
    match result {
        Err(EngineError::Configuration(ConfigurationError::ValidationFailed(message))) => {
            assert!(message.contains("The range has holes"));
        }
        other => panic!("Expected validation failure, got {:?}", other),
    }
}
