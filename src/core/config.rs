//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI arguments.
//!
//! Config lives at `~/.vtchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The chat port is not configurable: both peers must agree on it without a
//! handshake, so it stays fixed at `net::CHAT_PORT`.

use log::{Level, log};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
    pub char_limit: Option<usize>,
}

/// Colour names or `#rrggbb` hex values, parsed by the TUI theme.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub title: Option<String>,
    pub title_bg: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
    pub local_sender: Option<String>,
    pub remote_sender: Option<String>,
    pub message: Option<String>,
    pub border: Option<String>,
    pub hint: Option<String>,
    pub error: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "vtchat.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_CHAR_LIMIT: usize = 280;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub username: String,
    pub remote_host: String,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub char_limit: usize,
    pub theme: ThemeConfig,
    /// Warnings raised while resolving, logged once the logger is up
    pub diagnostics: Diagnostics,
}

// ============================================================================
// Diagnostics (collected before logging exists)
// ============================================================================

/// Log records held back until `main` has installed the file logger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    records: Vec<(Level, String)>,
}

impl Diagnostics {
    pub fn info(&mut self, message: impl Into<String>) {
        self.records.push((Level::Info, message.into()));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.records.push((Level::Warn, message.into()));
    }

    pub fn records(&self) -> &[(Level, String)] {
        &self.records
    }

    pub fn has_warnings(&self) -> bool {
        self.records.iter().any(|(level, _)| *level == Level::Warn)
    }

    /// Emit every held record through the `log` facade, in order.
    pub fn replay(&self) {
        for (level, message) in &self.records {
            log!(*level, "{}", message);
        }
    }
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

/// Returns the path to `~/.vtchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vtchat").join("config.toml"))
}

/// Load config from `~/.vtchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
///
/// Runs before the logger is installed, so progress and problems are
/// recorded in `diagnostics` for `main` to replay.
pub fn load_config(diagnostics: &mut Diagnostics) -> Result<ChatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            diagnostics.warn("Could not determine home directory, using default config");
            return Ok(ChatConfig::default());
        }
    };

    if !path.exists() {
        diagnostics.info(format!(
            "No config file found, generating default at {}",
            path.display()
        ));
        if let Err(e) = generate_default_config(&path) {
            diagnostics.warn(format!("Failed to write default config: {e}"));
        }
        return Ok(ChatConfig::default());
    }

    let config = load_config_from(&path)?;
    diagnostics.info(format!("Loaded config from {}", path.display()));
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<ChatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r##"# vtchat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI arguments.
# The chat port is fixed at 9999 and cannot be changed here.

# [general]
# log_file = "vtchat.log"            # Or set VTCHAT_LOG_FILE
# log_level = "debug"                # off, error, warn, info, debug, trace (VTCHAT_LOG_LEVEL)
# char_limit = 280                   # Max characters per message

# [theme]                            # Colour names ("cyan", "lightmagenta") or "#rrggbb"
# title = "#00ffff"
# title_bg = "#008b8b"
# status = "#ff00ff"
# timestamp = "#808080"
# local_sender = "#00ff00"
# remote_sender = "#ff00ff"
# message = "#ffffff"
# border = "#00ffff"
# hint = "#808080"
# error = "red"
"##;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatConfig, username: &str, remote_host: &str) -> ResolvedConfig {
    resolve_with_env(config, username, remote_host, |key| std::env::var(key).ok())
}

/// `resolve` with the environment lookup supplied by the caller.
pub fn resolve_with_env<E>(
    config: &ChatConfig,
    username: &str,
    remote_host: &str,
    env: E,
) -> ResolvedConfig
where
    E: Fn(&str) -> Option<String>,
{
    let mut diagnostics = Diagnostics::default();

    // Log file: env → config → default
    let log_file = env("VTCHAT_LOG_FILE")
        .or_else(|| config.general.log_file.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    // Log level: env → config → default
    let log_level = match env("VTCHAT_LOG_LEVEL").or_else(|| config.general.log_level.clone()) {
        Some(level) => parse_level(&level).unwrap_or_else(|| {
            diagnostics.warn(format!(
                "Unknown log level {:?}, using {}",
                level, DEFAULT_LOG_LEVEL
            ));
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    let char_limit = match config.general.char_limit {
        Some(0) => {
            diagnostics.warn(format!(
                "char_limit = 0 would block all input, using {}",
                DEFAULT_CHAR_LIMIT
            ));
            DEFAULT_CHAR_LIMIT
        }
        Some(limit) => limit,
        None => DEFAULT_CHAR_LIMIT,
    };

    ResolvedConfig {
        username: username.to_string(),
        remote_host: remote_host.to_string(),
        log_file,
        log_level,
        char_limit,
        theme: config.theme.clone(),
        diagnostics,
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ChatConfig::default();
        assert!(config.general.log_file.is_none());
        assert!(config.theme.title.is_none());
    }

    #[test]
    fn test_resolve_carries_cli_arguments() {
        let resolved = resolve(&ChatConfig::default(), "alice", "100.64.0.2");
        assert_eq!(resolved.username, "alice");
        assert_eq!(resolved.remote_host, "100.64.0.2");
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ChatConfig {
            general: GeneralConfig {
                log_file: Some("/tmp/from-config.log".to_string()),
                log_level: Some("warn".to_string()),
                char_limit: Some(500),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, "a", "b", no_env);
        assert_eq!(resolved.char_limit, 500);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/from-config.log"));
        assert!(resolved.diagnostics.records().is_empty());
    }

    #[test]
    fn test_resolve_defaults_without_config_or_env() {
        let resolved = resolve_with_env(&ChatConfig::default(), "a", "b", no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(resolved.char_limit, DEFAULT_CHAR_LIMIT);
    }

    #[test]
    fn test_env_overrides_config() {
        let config = ChatConfig {
            general: GeneralConfig {
                log_file: Some("/tmp/from-config.log".to_string()),
                log_level: Some("warn".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "VTCHAT_LOG_LEVEL" => Some("trace".to_string()),
            "VTCHAT_LOG_FILE" => Some("/tmp/from-env.log".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, "a", "b", env);
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/from-env.log"));
    }

    #[test]
    fn test_zero_char_limit_falls_back_with_warning() {
        let config = ChatConfig {
            general: GeneralConfig {
                char_limit: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, "a", "b", no_env);
        assert_eq!(resolved.char_limit, DEFAULT_CHAR_LIMIT);
        assert!(resolved.diagnostics.has_warnings());
        assert!(resolved.diagnostics.records()[0].1.contains("char_limit = 0"));
    }

    #[test]
    fn test_unknown_log_level_falls_back_with_warning() {
        let config = ChatConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, "a", "b", no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        let (level, message) = &resolved.diagnostics.records()[0];
        assert_eq!(*level, Level::Warn);
        assert!(message.contains("loud"));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info"), Some(LevelFilter::Info));
        assert_eq!(parse_level(" TRACE "), Some(LevelFilter::Trace));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_diagnostics_keep_order_and_levels() {
        let mut diagnostics = Diagnostics::default();
        assert!(!diagnostics.has_warnings());
        diagnostics.info("first");
        diagnostics.warn("second");
        assert_eq!(
            diagnostics.records(),
            &[
                (Level::Info, "first".to_string()),
                (Level::Warn, "second".to_string())
            ]
        );
        assert!(diagnostics.has_warnings());
    }

    #[test]
    fn test_generate_default_config_writes_commented_file() {
        let dir = std::env::temp_dir().join(format!("vtchat-gen-{}", std::process::id()));
        let path = dir.join("config.toml");
        generate_default_config(&path).unwrap();
        let config = load_config_from(&path).unwrap();
        let _ = fs::remove_dir_all(&dir);
        assert!(config.general.char_limit.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r##"
[general]
log_file = "/tmp/chat.log"
log_level = "info"
char_limit = 140

[theme]
local_sender = "lightgreen"
remote_sender = "#ff00ff"
"##;
        let config: ChatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_file.as_deref(), Some("/tmp/chat.log"));
        assert_eq!(config.general.char_limit, Some(140));
        assert_eq!(config.theme.local_sender.as_deref(), Some("lightgreen"));
        assert_eq!(config.theme.remote_sender.as_deref(), Some("#ff00ff"));
        assert!(config.theme.title.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
char_limit = 64
"#;
        let config: ChatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.char_limit, Some(64));
        assert!(config.general.log_level.is_none());
        assert!(config.theme.border.is_none());
    }

    #[test]
    fn test_load_config_from_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("vtchat-bad-{}.toml", std::process::id()));
        fs::write(&path, "[general\nchar_limit = ").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("vtchat-definitely-missing/config.toml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::Io(_))));
    }
}
