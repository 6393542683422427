//! # Application Configuration
//!
//! Server and backend settings. Values come from (lowest to highest
//! precedence) built-in defaults, the process environment (optionally loaded
//! from a `.env` file by the binary), and command-line flags.
//!
//! | variable | field |
//! |---|---|
//! | `HOST` | `host` |
//! | `PORT` | `port` |
//! | `CORS_ORIGINS` | `cors_origins` (comma-separated) |
//! | `STORAGE_BACKEND` | `backend` (`memory` or `supabase`) |
//! | `SUPABASE_URL` | `supabase.url` |
//! | `SUPABASE_ANON_KEY` | `supabase.anon_key` |
//! | `SEED_DEMO_DATA` | `seed_demo_data` |
//! | `UPLOADS_DIR` | `uploads_dir` |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Which persistence backend serves the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Ephemeral in-process collections
    #[default]
    Memory,
    /// Hosted Supabase (PostgREST) tables
    Supabase,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "memoria" => Ok(BackendKind::Memory),
            "supabase" => Ok(BackendKind::Supabase),
            _ => Err(ConfigError::InvalidValue {
                name: "STORAGE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => f.write_str("memory"),
            BackendKind::Supabase => f.write_str("supabase"),
        }
    }
}

/// Supabase project credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub anon_key: Option<String>,
}

impl SupabaseConfig {
    /// Both values, or `None` if either is missing or blank
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        let key = self
            .anon_key
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())?;
        Some((url, key))
    }
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 1337)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (empty: allow any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// Populate an in-memory store with the demo listings
    #[serde(default)]
    pub seed_demo_data: bool,

    /// Directory served under `/uploads` (default: "uploads")
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    1337
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            backend: BackendKind::default(),
            supabase: SupabaseConfig::default(),
            seed_demo_data: false,
            uploads_dir: default_uploads_dir(),
        }
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

impl AppConfig {
    /// Create a config with the specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            config.backend = backend.parse()?;
        }
        config.supabase = SupabaseConfig {
            url: lookup("SUPABASE_URL"),
            anon_key: lookup("SUPABASE_ANON_KEY"),
        };
        if let Some(seed) = lookup("SEED_DEMO_DATA") {
            config.seed_demo_data = parse_bool("SEED_DEMO_DATA", &seed)?;
        }
        if let Some(dir) = lookup("UPLOADS_DIR").filter(|v| !v.trim().is_empty()) {
            config.uploads_dir = PathBuf::from(dir.trim());
        }

        Ok(config)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:1337");
        assert_eq!(config.backend, BackendKind::Memory);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn test_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("STORAGE_BACKEND", "Supabase"),
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("CORS_ORIGINS", "http://localhost:5173, http://localhost:3000,"),
            ("SEED_DEMO_DATA", "yes"),
            ("UPLOADS_DIR", "/srv/propiedades/uploads"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, BackendKind::Supabase);
        assert_eq!(
            config.supabase.credentials(),
            Some(("https://demo.supabase.co", "anon"))
        );
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.seed_demo_data);
        assert_eq!(config.uploads_dir, PathBuf::from("/srv/propiedades/uploads"));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidValue {
                name: "PORT",
                value: "http".to_string()
            })
        );
        assert!(AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "mysql")])).is_err());
    }

    #[test]
    fn test_blank_credentials_are_missing() {
        let supabase = SupabaseConfig {
            url: Some("https://demo.supabase.co".to_string()),
            anon_key: Some("  ".to_string()),
        };
        assert_eq!(supabase.credentials(), None);
    }
}
