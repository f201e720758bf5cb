//! Configuration management for the gamble engine
//!
//! Settings are read from TOML, overridden from `CHATGAMBLE_*` environment
//! variables and validated before a handler is built from them.

use crate::errors::{ConfigurationError, EngineResult, RangeError};
use crate::games::messages::MessageTemplates;
use crate::games::range::{RangePartition, RangeSpec};
use crate::games::strategy::{Strategy, ThresholdParams};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Outcome strategy selected in the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GambleMode {
    #[serde(rename = "Percentage Linear")]
    PercentageLinear,
    Threshold,
    Ranges,
}

impl fmt::Display for GambleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GambleMode::PercentageLinear => write!(f, "Percentage Linear"),
            GambleMode::Threshold => write!(f, "Threshold"),
            GambleMode::Ranges => write!(f, "Ranges"),
        }
    }
}

impl FromStr for GambleMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Same names the TOML form accepts
        match s {
            "Percentage Linear" => Ok(GambleMode::PercentageLinear),
            "Threshold" => Ok(GambleMode::Threshold),
            "Ranges" => Ok(GambleMode::Ranges),
            _ => Err(ConfigurationError::UnknownMode(s.to_string())),
        }
    }
}

/// Everything one gamble command is configured with
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GambleSettings {
    pub currency_id: String,
    pub jackpot_counter_id: String,
    /// Smallest accepted wager
    pub minimum_entry: i64,
    /// Percent of every loss added to the jackpot, `<= 0` disables it
    pub jackpot_percent: f64,
    pub mode: GambleMode,
    pub threshold: ThresholdParams,
    pub ranges: Vec<RangeSpec>,
    pub messages: MessageTemplates,
}

impl Default for GambleSettings {
    fn default() -> Self {
        Self {
            currency_id: "points".to_string(),
            jackpot_counter_id: "jackpot".to_string(),
            minimum_entry: 100,
            jackpot_percent: 100.0,
            mode: GambleMode::PercentageLinear,
            threshold: ThresholdParams::default(),
            ranges: vec![
                RangeSpec::normal(0, 49, -1.0),
                RangeSpec::normal(50, 50, 0.0),
                RangeSpec::normal(51, 99, 1.0),
                RangeSpec::jackpot(100, 100),
            ],
            messages: MessageTemplates::default(),
        }
    }
}

impl GambleSettings {
    /// Builds the configured strategy
    pub fn strategy(&self) -> Result<Strategy, RangeError> {
        match self.mode {
            GambleMode::PercentageLinear => Ok(Strategy::PercentageLinear),
            GambleMode::Threshold => Ok(Strategy::Threshold(self.threshold)),
            GambleMode::Ranges => RangePartition::from_specs(&self.ranges).map(Strategy::Ranges),
        }
    }

    /// All problems with these settings, empty when usable
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.mode == GambleMode::Ranges {
            if let Err(e) = RangePartition::from_specs(&self.ranges) {
                errors.push(e.to_string());
            }
        }
        if self.jackpot_counter_id.trim().is_empty() {
            errors.push("Jackpot Counter not set!".to_string());
        }
        if self.currency_id.trim().is_empty() {
            errors.push("Currency is not set!".to_string());
        }
        if self.minimum_entry < 0 {
            errors.push("Minimum entry cannot be negative.".to_string());
        }
        if self.mode == GambleMode::Threshold {
            if self.threshold.max_roll < 0 {
                errors.push("Maximum roll cannot be negative.".to_string());
            }
            if self.threshold.win_points_factor < 0.0 {
                errors.push("Won points multiplicator cannot be negative.".to_string());
            }
        }

        errors
    }
}

/// Log verbosity of the binary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ConfigurationError::InvalidValue {
                field: "logging.level".to_string(),
                value: s.to_string(),
                reason: "Expected one of error, warn, info, debug, trace".to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

/// Top-level configuration file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gamble: GambleSettings,
    pub logging: LoggingConfig,
}

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> EngineResult<AppConfig> {
        let config = self.load_unvalidated()?;
        self.validate(&config)?;

        Ok(config)
    }

    /// Like [`ConfigLoader::load`] but leaves validation to the caller
    pub fn load_unvalidated(&self) -> EngineResult<AppConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            AppConfig::default()
        };

        apply_overrides(&mut config, |key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from TOML file
    fn load_from_file(&self, path: &str) -> EngineResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into()
        })
    }

    /// Validate configuration values
    pub fn validate(&self, config: &AppConfig) -> EngineResult<()> {
        let errors = config.gamble.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::ValidationFailed(errors.join(" ")).into())
        }
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig, path: &str) -> EngineResult<()> {
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, toml_string).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into()
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `CHATGAMBLE_*` overrides read through `lookup`.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> EngineResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(currency) = lookup("CHATGAMBLE_CURRENCY_ID") {
        config.gamble.currency_id = currency;
    }
    if let Some(counter) = lookup("CHATGAMBLE_JACKPOT_COUNTER_ID") {
        config.gamble.jackpot_counter_id = counter;
    }
    if let Some(minimum) = lookup("CHATGAMBLE_MINIMUM_ENTRY") {
        config.gamble.minimum_entry =
            minimum.parse().map_err(|_| ConfigurationError::InvalidValue {
                field: "CHATGAMBLE_MINIMUM_ENTRY".to_string(),
                value: minimum.clone(),
                reason: "Invalid integer".to_string(),
            })?;
    }
    if let Some(percent) = lookup("CHATGAMBLE_JACKPOT_PERCENT") {
        config.gamble.jackpot_percent =
            percent.parse().map_err(|_| ConfigurationError::InvalidValue {
                field: "CHATGAMBLE_JACKPOT_PERCENT".to_string(),
                value: percent.clone(),
                reason: "Invalid number".to_string(),
            })?;
    }
    if let Some(mode) = lookup("CHATGAMBLE_MODE") {
        config.gamble.mode = mode.parse()?;
    }
    if let Some(level) = lookup("CHATGAMBLE_LOG_LEVEL") {
        config.logging.level = level.parse()?;
    }

    Ok(())
}

/// Builder pattern for creating configurations
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new config builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn currency(mut self, currency_id: &str) -> Self {
        self.config.gamble.currency_id = currency_id.to_string();
        self
    }

    pub fn jackpot_counter(mut self, counter_id: &str) -> Self {
        self.config.gamble.jackpot_counter_id = counter_id.to_string();
        self
    }

    pub fn minimum_entry(mut self, minimum: i64) -> Self {
        self.config.gamble.minimum_entry = minimum;
        self
    }

    pub fn jackpot_percent(mut self, percent: f64) -> Self {
        self.config.gamble.jackpot_percent = percent;
        self
    }

    pub fn threshold(mut self, params: ThresholdParams) -> Self {
        self.config.gamble.mode = GambleMode::Threshold;
        self.config.gamble.threshold = params;
        self
    }

    pub fn ranges(mut self, ranges: Vec<RangeSpec>) -> Self {
        self.config.gamble.mode = GambleMode::Ranges;
        self.config.gamble.ranges = ranges;
        self
    }

    pub fn messages(mut self, messages: MessageTemplates) -> Self {
        self.config.gamble.messages = messages;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> EngineResult<()> {
    let config = AppConfig::default();
    let loader = ConfigLoader::new();
    loader.save(&config, path)
}
