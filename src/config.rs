//! Runtime configuration.
//!
//! All tunables are either environment variables (read once at startup into
//! `Lazy` statics or via [`Config::from_env`]) or compile-time constants in
//! the submodules below.

use crate::platform::Platform;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

/// Log file path
/// Read from JUKEBOT_LOG_FILE environment variable, defaults to "jukebot.log"
pub static LOG_FILE_PATH: Lazy<String> = Lazy::new(|| {
    env::var("JUKEBOT_LOG_FILE").unwrap_or_else(|_| "jukebot.log".to_string())
});

/// Typed bot configuration.
///
/// The original host supplied these as an untyped key/value map; here every
/// field is named, typed, and carries a documented default. The legacy
/// `auto_install_deps` key is intentionally gone: dependencies are declared
/// in the Cargo manifest, never installed at runtime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Platform used when a request does not name one. Default: qq.
    pub default_platform: Platform,
    /// Decrypt NCM containers before replying. Default: true.
    pub enable_conversion: bool,
    /// Root directory for `songs/`, `temp/` and `songs_data.json`.
    /// Default: `~/.jukebot` (tilde expanded).
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_platform: Platform::Qq,
            enable_conversion: true,
            data_dir: PathBuf::from(shellexpand::tilde("~/.jukebot").to_string()),
        }
    }
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// * `JUKEBOT_DEFAULT_PLATFORM` — one of `qq`, `netease`, `kugou`, `kuwo`
    /// * `JUKEBOT_ENABLE_CONVERSION` — `0`/`false`/`no`/`off` to disable
    /// * `JUKEBOT_DATA_DIR` — data directory, `~` expanded
    pub fn from_env() -> Self {
        let default_platform = match env::var("JUKEBOT_DEFAULT_PLATFORM") {
            Ok(token) => Platform::from_token(token.trim()).unwrap_or_else(|| {
                log::warn!("Unknown JUKEBOT_DEFAULT_PLATFORM {:?}, using qq", token);
                Platform::Qq
            }),
            Err(_) => Platform::Qq,
        };

        let enable_conversion = env_flag("JUKEBOT_ENABLE_CONVERSION", true);

        let data_dir = env::var("JUKEBOT_DATA_DIR")
            .map(|raw| PathBuf::from(shellexpand::tilde(&raw).to_string()))
            .unwrap_or_else(|_| Config::default().data_dir);

        Self {
            default_platform,
            enable_conversion,
            data_dir,
        }
    }

    /// Directory holding the durable song cache.
    pub fn songs_dir(&self) -> PathBuf {
        self.data_dir.join("songs")
    }

    /// Directory holding in-flight download artifacts.
    pub fn temp_dir(&self) -> PathBuf {
        self.data_dir.join("temp")
    }

    /// File the full last-search payload is written to, overwritten on each
    /// search.
    pub fn results_file(&self) -> PathBuf {
        self.data_dir.join("songs_data.json")
    }

    /// Create the songs and temp directories if missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs_err::create_dir_all(self.songs_dir())?;
        fs_err::create_dir_all(self.temp_dir())?;
        Ok(())
    }
}

/// Boolean environment flag; anything except `0`/`false`/`no`/`off` is true.
fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => default,
    }
}

/// Search endpoint configuration
pub mod search {
    use std::time::Duration;

    /// Fixed aggregator endpoint every search request is posted to.
    pub const ENDPOINT: &str = "https://music.txqq.pro/";

    /// Browser-like user agent the aggregator expects.
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10,0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

    /// Request timeout for search calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Search request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Audio download configuration
pub mod download {
    use std::time::Duration;

    /// Timeout for fetching one audio stream (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 600;

    /// TCP connect timeout (in seconds)
    pub const CONNECT_TIMEOUT_SECS: u64 = 30;

    /// Audio fetch timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    /// Connect timeout duration
    pub fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_platform, Platform::Qq);
        assert!(config.enable_conversion);
    }

    #[test]
    fn test_derived_paths() {
        let config = Config {
            data_dir: PathBuf::from("/var/lib/jukebot"),
            ..Config::default()
        };
        assert_eq!(config.songs_dir(), PathBuf::from("/var/lib/jukebot/songs"));
        assert_eq!(config.temp_dir(), PathBuf::from("/var/lib/jukebot/temp"));
        assert_eq!(config.results_file(), PathBuf::from("/var/lib/jukebot/songs_data.json"));
    }
}
