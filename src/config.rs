//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-optimizer.toml` in current directory
//! 4. `~/.config/sql-optimizer/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5001
//! debug = false
//! service_name = "sql-optimizer-backend"
//!
//! [rules]
//! disabled = ["STYLE002"]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `HOST` | Bind address of the HTTP server |
//! | `PORT` | Bind port of the HTTP server |
//! | `DEBUG` | `1`/`true` enables debug logging |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rules:  RulesConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host:         String,
    pub port:         u16,
    pub debug:        bool,
    /// Reported by the health endpoint
    pub service_name: String
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host:         String::from("0.0.0.0"),
            port:         5001,
            debug:        false,
            service_name: String::from("sql-optimizer-backend")
        }
    }
}

impl ServerConfig {
    /// `host:port` suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-optimizer.toml)
    /// 3. Config file in home directory (~/.config/sql-optimizer/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-optimizer")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".sql-optimizer.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Parse a single TOML configuration file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Override with `HOST`, `PORT` and `DEBUG`
    pub fn apply_env(&mut self) -> AppResult<()> {
        self.apply_overrides(
            env::var("HOST").ok(),
            env::var("PORT").ok(),
            env::var("DEBUG").ok()
        )
    }

    fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
        debug: Option<String>
    ) -> AppResult<()> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .map_err(|_| config_error(format!("Invalid PORT value: '{}'", port)))?;
        }
        if let Some(debug) = debug {
            self.server.debug = parse_flag(&debug);
        }
        Ok(())
    }
}

/// Parse boolean toggle from environment
fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
