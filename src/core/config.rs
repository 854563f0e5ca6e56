//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.burrow/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::pager::DEFAULT_STATUS_MARGIN;
use crate::protocol::Target;
use crate::protocol::transport::DEFAULT_MAX_RESPONSE_BYTES;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BurrowConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub selector: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub status_margin: Option<u16>,
    pub max_history: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HOST: &str = "quux.org";
pub const DEFAULT_PORT: u16 = 70;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub host: String,
    pub port: u16,
    pub selector: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_response_bytes: usize,
    pub status_margin: u16,
    pub max_history: Option<usize>,
}

impl ResolvedConfig {
    /// The first page of the session.
    pub fn start_target(&self) -> Target {
        Target::new(&self.host, self.port.to_string(), &self.selector)
    }
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub selector: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.burrow/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".burrow").join("config.toml"))
}

/// Load config from `~/.burrow/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BurrowConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BurrowConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BurrowConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(BurrowConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<BurrowConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: BurrowConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Burrow Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# host = "quux.org"                  # Or set BURROW_HOST env var
# port = 70                          # Or set BURROW_PORT env var
# selector = ""                      # Or set BURROW_SELECTOR env var

# [network]
# connect_timeout_secs = 10
# read_timeout_secs = 30
# max_response_bytes = 1048576       # Larger responses are truncated

# [display]
# status_margin = 5                  # Rows kept free below each page
# max_history = 100                  # Unlimited when unset
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &BurrowConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &BurrowConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Host: CLI → env → config → default
    let host = cli
        .host
        .clone()
        .or_else(|| env("BURROW_HOST"))
        .or_else(|| config.server.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    // Port: CLI → env → config → default. An unparseable env value is skipped.
    let port = cli
        .port
        .or_else(|| {
            env("BURROW_PORT").and_then(|p| match p.trim().parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("Ignoring invalid BURROW_PORT '{}'", p);
                    None
                }
            })
        })
        .or(config.server.port)
        .unwrap_or(DEFAULT_PORT);

    let selector = cli
        .selector
        .clone()
        .or_else(|| env("BURROW_SELECTOR"))
        .or_else(|| config.server.selector.clone())
        .unwrap_or_default();

    ResolvedConfig {
        host,
        port,
        selector,
        connect_timeout: Duration::from_secs(
            config
                .network
                .connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        ),
        read_timeout: Duration::from_secs(
            config
                .network
                .read_timeout_secs
                .unwrap_or(DEFAULT_READ_TIMEOUT_SECS),
        ),
        max_response_bytes: config
            .network
            .max_response_bytes
            .unwrap_or(DEFAULT_MAX_RESPONSE_BYTES),
        status_margin: config.display.status_margin.unwrap_or(DEFAULT_STATUS_MARGIN),
        max_history: config.display.max_history.map(|limit| {
            if limit == 0 {
                warn!("max_history = 0 leaves no room for the first page, using 1");
                1
            } else {
                limit
            }
        }),
    }
}
