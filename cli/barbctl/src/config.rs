//! Configuration and session management.
//!
//! Handles:
//! - Backend and postal lookup endpoints
//! - Request timeouts and log level
//! - The backend session cookie

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use barblab_postal::DEFAULT_VIACEP_URL;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Session file name.
const SESSION_FILE: &str = "session.json";

/// Lower bound for any configured timeout.
const MIN_TIMEOUT_MS: u64 = 100;

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("br", "barblab", "barb")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Booking backend URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Postal lookup service URL.
    #[serde(default = "default_postal_url")]
    pub postal_url: String,

    /// Timeout for backend requests, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Timeout for postal lookups, in milliseconds.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    std::env::var("BARB_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

fn default_postal_url() -> String {
    std::env::var("BARB_POSTAL_URL").unwrap_or_else(|_| DEFAULT_VIACEP_URL.to_string())
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_lookup_timeout_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    std::env::var("BARB_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            postal_url: default_postal_url(),
            request_timeout_ms: default_request_timeout_ms(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from `path`, or return default if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Get the API URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Backend request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(MIN_TIMEOUT_MS))
    }

    /// Postal lookup timeout.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms.max(MIN_TIMEOUT_MS))
    }
}

/// Backend session, kept between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// `name=value` pair from the backend's `Set-Cookie`.
    pub cookie: String,

    /// Client ID when logged in as a client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,

    /// Whether the session carries an admin login.
    #[serde(default)]
    pub admin: bool,
}

impl Session {
    /// Create a session from a cookie.
    pub fn new(cookie: String) -> Self {
        Self {
            cookie,
            client_id: None,
            admin: false,
        }
    }

    /// Load the session from disk.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&config_dir()?.join(SESSION_FILE))
    }

    /// Load the session from `path`.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {:?}", path))?;

        let session: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {:?}", path))?;

        Ok(Some(session))
    }

    /// Save the session to disk.
    pub fn save(&self) -> Result<()> {
        let dir = config_dir()?;
        fs::create_dir_all(&dir)?;
        self.save_to(&dir.join(SESSION_FILE))
    }

    /// Save the session to `path`, readable by the owner only.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to write session to {:?}", path))?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write session to {:?}", path))?;
        }

        Ok(())
    }

    /// Delete the session from disk.
    pub fn delete() -> Result<()> {
        let path = config_dir()?.join(SESSION_FILE);

        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete session at {:?}", path))?;
        }

        Ok(())
    }

    /// True if neither a client nor an admin is logged in.
    pub fn is_anonymous(&self) -> bool {
        self.client_id.is_none() && !self.admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.api_url.is_empty());
        assert!(!config.postal_url.is_empty());
        assert_eq!(config.lookup_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "api_url": "http://barber.local", "lookup_timeout_ms": 1 }"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url(), "http://barber.local");
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.lookup_timeout(), Duration::from_millis(MIN_TIMEOUT_MS));
    }

    #[test]
    fn test_session_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        assert!(Session::load_from(&path).unwrap().is_none());

        let mut session = Session::new("session=abc".to_string());
        assert!(session.is_anonymous());
        session.client_id = Some(7);
        session.save_to(&path).unwrap();

        let loaded = Session::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, session);
        assert!(!loaded.is_anonymous());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
