//! Configuration loading, validation, and management for tradeprompt.
//!
//! Loads configuration from `~/.tradeprompt/config.toml` (or the path in
//! `TRADEPROMPT_CONFIG`) with environment variable overrides. Validates all
//! settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tradeprompt_core::{MdEntryType, SecurityListRequestType, SubscriptionRequestType};

/// The root configuration structure.
///
/// Maps directly to `~/.tradeprompt/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Append a UUID to MDReqID / SecurityReqID so every request is distinct
    #[serde(default)]
    pub unique_request_ids: bool,

    /// MarketDataRequest defaults
    #[serde(default)]
    pub market_data: MarketDataConfig,

    /// SecurityListRequest defaults
    #[serde(default)]
    pub security_list: SecurityListConfig,

    /// Where finished messages are handed off
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    #[serde(default = "default_md_req_id")]
    pub md_req_id: String,

    #[serde(default = "default_subscription_request_type")]
    pub subscription_request_type: SubscriptionRequestType,

    /// 0 = full book
    #[serde(default)]
    pub market_depth: u32,

    /// One NoMDEntryTypes entry per element. Must not be empty.
    #[serde(default = "default_entry_types")]
    pub entry_types: Vec<MdEntryType>,

    #[serde(default)]
    pub instrument: InstrumentConfig,
}

fn default_md_req_id() -> String {
    "MARKETDATAID".into()
}
fn default_subscription_request_type() -> SubscriptionRequestType {
    SubscriptionRequestType::SnapshotPlusUpdates
}
fn default_entry_types() -> Vec<MdEntryType> {
    vec![MdEntryType::Bid]
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            md_req_id: default_md_req_id(),
            subscription_request_type: default_subscription_request_type(),
            market_depth: 0,
            entry_types: default_entry_types(),
            instrument: InstrumentConfig::default(),
        }
    }
}

/// How the NoRelatedSym instrument is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentSource {
    /// Always use `symbol`
    Fixed,
    /// Draw one of `candidates` at random
    Random,
    /// Ask the operator
    Prompt,
}

impl std::fmt::Display for InstrumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstrumentSource::Fixed => write!(f, "fixed"),
            InstrumentSource::Random => write!(f, "random"),
            InstrumentSource::Prompt => write!(f, "prompt"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    #[serde(default = "default_instrument_source")]
    pub source: InstrumentSource,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    /// Seed for the `random` source. Unset = seeded from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_instrument_source() -> InstrumentSource {
    InstrumentSource::Fixed
}
fn default_symbol() -> String {
    "US00084EAE86".into()
}
fn default_candidates() -> Vec<String> {
    [
        "SGXF48097749",
        "SG6PE4000001",
        "SG6TC3000008",
        "SG7BB1000008",
        "CH0482172324",
        "XS2357239057",
        "XS1679216801",
        "US251525AX97",
        "USF1067PAB25",
        "XS2351242461",
        "XS2201954067",
        "XS1513776374",
        "USG9T27HAA24",
        "NO0011128316",
        "FR0011606169",
        "XS2348280962",
        "US03938LBC72",
        "XS1410341389",
        "XS2627125672",
        "XS2611617700",
        "XS2611617619",
        "US86562MDG24",
        "USY72570AL17",
        "US44891CCZ41",
        "XS2787854673",
        "XS2502879096",
        "XS2022434364",
        "XS2775732451",
        "XS2775699577",
        "XS2774954577",
        "USY4841M6A22",
        "USY3815NBH36",
        "US96122QAC78",
        "HK0000963279",
        "US91282CHP95",
        "US912810TP30",
        "US912828UN88",
        "US912796YM59",
        "US91282CGT27",
        "XS2690013052",
        "US302154DZ91",
        "USQ82780AG49",
        "XS2675743160",
        "USJ54675BC69",
        "SGXF24733614",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            source: default_instrument_source(),
            symbol: default_symbol(),
            candidates: default_candidates(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityListConfig {
    #[serde(default = "default_security_req_id")]
    pub security_req_id: String,

    #[serde(default = "default_security_list_request_type")]
    pub request_type: SecurityListRequestType,
}

fn default_security_req_id() -> String {
    "SECURITYREQID".into()
}
fn default_security_list_request_type() -> SecurityListRequestType {
    SecurityListRequestType::AllSecurities
}

impl Default for SecurityListConfig {
    fn default() -> Self {
        Self {
            security_req_id: default_security_req_id(),
            request_type: default_security_list_request_type(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Print the tag=value rendering to stdout
    Console,
    /// Append JSON lines to `journal_path`
    Journal,
}

impl std::str::FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(EngineKind::Console),
            "journal" => Ok(EngineKind::Journal),
            other => Err(ConfigError::ValidationError(format!(
                "unknown engine kind '{other}' (expected console or journal)"
            ))),
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Console => write!(f, "console"),
            EngineKind::Journal => write!(f, "journal"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_engine_kind")]
    pub kind: EngineKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_path: Option<PathBuf>,
}

fn default_engine_kind() -> EngineKind {
    EngineKind::Console
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: default_engine_kind(),
            journal_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    ///
    /// Environment overrides:
    /// - `TRADEPROMPT_CONFIG`: config file path
    /// - `TRADEPROMPT_ENGINE`: engine kind
    /// - `TRADEPROMPT_JOURNAL`: journal path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_at(&Self::config_path())
    }

    /// Load from `path` and apply the environment overrides.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(kind) = std::env::var("TRADEPROMPT_ENGINE") {
            self.engine.kind = kind.parse()?;
        }
        if let Ok(path) = std::env::var("TRADEPROMPT_JOURNAL") {
            self.engine.journal_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".tradeprompt")
    }

    /// Config file path, honouring `TRADEPROMPT_CONFIG`.
    pub fn config_path() -> PathBuf {
        std::env::var("TRADEPROMPT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::config_dir().join("config.toml"))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.market_data.entry_types.is_empty() {
            return Err(ConfigError::ValidationError(
                "market_data.entry_types must list at least one entry type".into(),
            ));
        }

        if self.market_data.md_req_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "market_data.md_req_id must not be empty".into(),
            ));
        }

        if self.security_list.security_req_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "security_list.security_req_id must not be empty".into(),
            ));
        }

        let instrument = &self.market_data.instrument;
        match instrument.source {
            InstrumentSource::Fixed if instrument.symbol.trim().is_empty() => {
                return Err(ConfigError::ValidationError(
                    "instrument source 'fixed' needs a symbol".into(),
                ));
            }
            InstrumentSource::Random if instrument.candidates.is_empty() => {
                return Err(ConfigError::ValidationError(
                    "instrument source 'random' needs at least one candidate".into(),
                ));
            }
            _ => {}
        }

        if self.engine.kind == EngineKind::Journal && self.engine.journal_path.is_none() {
            return Err(ConfigError::ValidationError(
                "engine kind 'journal' needs journal_path".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            unique_request_ids: false,
            market_data: MarketDataConfig::default(),
            security_list: SecurityListConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
