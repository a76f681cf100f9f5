//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. the `--config` flag
//! 2. `$FAXFETCH_CONFIG` (environment variable)
//! 3. `~/.config/faxfetch/config.toml` (Linux/macOS)
//!    `%APPDATA%\faxfetch\config.toml` (Windows)
//!
//! Mailbox and share settings are mandatory, so a missing or unparseable
//! file is an error rather than a silent fallback to defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// IMAP endpoint and credentials.
    pub mailbox: MailboxConfig,
    /// File-share destination.
    pub store: StoreConfig,
    /// General behavior settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// IMAP endpoint and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct MailboxConfig {
    /// IMAP server hostname.
    pub host: String,
    /// IMAPS port.
    #[serde(default = "default_imap_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Mailbox to poll for unread faxes.
    #[serde(default = "default_mailbox")]
    pub mailbox: String,
}

/// File-share destination for saved faxes.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Local mount point of the share (e.g. `/mnt/faxshare`).
    pub mount: PathBuf,
    /// Subdirectory for saved PDFs, relative to the share root.
    #[serde(default = "default_directory")]
    pub directory: String,
}

/// General behavior settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for log files.
    pub cache_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            cache_dir: None,
        }
    }
}

fn default_imap_port() -> u16 {
    993
}

fn default_mailbox() -> String {
    "INBOX".to_string()
}

fn default_directory() -> String {
    "fax".to_string()
}

// ── Load / locate ───────────────────────────────────────────────

/// Load configuration from `override_path` or the standard locations.
pub fn load_config(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()
            .ok_or_else(|| anyhow::anyhow!("could not determine config file path"))?,
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("cannot read config '{}': {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("cannot parse config '{}': {e}", path.display()))?;

    Ok(config)
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("FAXFETCH_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("faxfetch").join("config.toml"))
}

/// Return the cache directory for log files.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("faxfetch")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let toml_str = r#"
[mailbox]
host = "imap.example.com"
port = 1993
username = "fax@example.com"
password = "secret"
mailbox = "Faxes"

[store]
mount = "/mnt/faxshare"
directory = "incoming"

[general]
log_level = "debug"
"#;
        let cfg: Config = toml::from_str(toml_str).expect("parse");
        assert_eq!(cfg.mailbox.host, "imap.example.com");
        assert_eq!(cfg.mailbox.port, 1993);
        assert_eq!(cfg.mailbox.mailbox, "Faxes");
        assert_eq!(cfg.store.mount, PathBuf::from("/mnt/faxshare"));
        assert_eq!(cfg.store.directory, "incoming");
        assert_eq!(cfg.general.log_level, "debug");
    }

    #[test]
    fn test_optional_fields_use_defaults() {
        let toml_str = r#"
[mailbox]
host = "imap.example.com"
username = "fax@example.com"
password = "secret"

[store]
mount = "/mnt/faxshare"
"#;
        let cfg: Config = toml::from_str(toml_str).expect("parse");
        assert_eq!(cfg.mailbox.port, 993);
        assert_eq!(cfg.mailbox.mailbox, "INBOX");
        assert_eq!(cfg.store.directory, "fax");
        assert_eq!(cfg.general.log_level, "info");
        assert!(cfg.general.cache_dir.is_none());
    }

    #[test]
    fn test_missing_credentials_is_an_error() {
        let toml_str = r#"
[mailbox]
host = "imap.example.com"

[store]
mount = "/mnt/faxshare"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/faxfetch.toml")));
        assert!(err.is_err());
    }
}
